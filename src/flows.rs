//! 表单提交流程
//!
//! 每个流程都遵循同一套步骤：校验并锁定表单 -> 调用 API -> 写回结果 -> 成功时跳转。
//! 表单在请求返回前被销毁时，结果会被丢弃，也不会跳转。

use std::future::Future;

use khelmela_shared::form::{FormState, FormStore};
use khelmela_shared::route::AppRoute;
use khelmela_shared::sanitize::format_description;
use khelmela_shared::validation::{BlogDraft, ImageFile, LoginForm, SignupForm, Validate};
use khelmela_shared::{AuthUser, BlogPayload, BlogPost, LoginRequest, RegisterRequest, SessionWriter};

use crate::api::KhelMelaApi;
use crate::config::RuntimeConfig;
use crate::error::{ApiError, ApiResult};
use crate::request::HttpClient;
use crate::upload::ImageHost;

/// 客户端导航
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// 通用提交步骤
///
/// 返回 `None` 的情况：校验失败、已有提交在进行、请求失败（错误已写入表单）、表单已销毁。
pub async fn submit_form<M, S, T, F, Fut>(store: &S, action: F) -> Option<T>
where
    M: Validate + Default + Clone,
    S: FormStore<M>,
    F: FnOnce(M) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let values = store.with_form(FormState::begin_submit).flatten()?;
    let result = action(values).await;
    if let Err(e) = &result {
        log::warn!("Form submission failed ({}): {}", e.kind.as_str(), e);
    }
    let outcome = store.with_form(|form| form.complete(result));
    if outcome.is_none() {
        log::debug!("Form disposed before the request finished; result dropped");
    }
    outcome.flatten()
}

/// 流程所需的依赖
pub struct FlowContext<'a, C: HttpClient, N: Navigator> {
    pub client: &'a C,
    pub config: &'a RuntimeConfig,
    pub navigator: &'a N,
    /// 当前会话令牌
    pub token: Option<&'a str>,
}

impl<'a, C: HttpClient, N: Navigator> FlowContext<'a, C, N> {
    pub fn new(client: &'a C, config: &'a RuntimeConfig, navigator: &'a N) -> Self {
        Self {
            client,
            config,
            navigator,
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<&'a str>) -> Self {
        self.token = token;
        self
    }

    fn api(&self) -> KhelMelaApi<'a, C> {
        KhelMelaApi::new(self.client, self.config).with_token(self.token)
    }

    fn image_host(&self) -> ImageHost<'a, C> {
        ImageHost::new(self.client, self.config)
    }

    /// 单独上传图片（编辑器选中图片后立即上传）
    pub async fn upload_image(&self, file: &ImageFile) -> ApiResult<String> {
        self.image_host().upload(file).await
    }

    // =========================================================
    // 登录 / 注册
    // =========================================================

    /// 登录成功后写入会话并跳转到博客列表
    pub async fn login<S, W>(&self, form: &S, session: &W) -> bool
    where
        S: FormStore<LoginForm>,
        W: SessionWriter,
    {
        let api = self.api();
        let done = submit_form(form, |values: LoginForm| async move {
            let user = api
                .login(LoginRequest {
                    email: values.email.trim().to_string(),
                    password: values.password,
                })
                .await?;
            if session.login(user) {
                Ok(())
            } else {
                Err(ApiError::parse("Login failed: no session token received"))
            }
        })
        .await;

        if done.is_some() {
            self.navigator.navigate(&AppRoute::Blog.to_path());
        }
        done.is_some()
    }

    /// 创建账号（可选先上传头像），成功后回到首页
    pub async fn signup<S>(&self, form: &S) -> bool
    where
        S: FormStore<SignupForm>,
    {
        let api = self.api();
        let host = self.image_host();
        let done = submit_form(form, |values: SignupForm| async move {
            let profile_photo = match &values.photo {
                Some(photo) => Some(host.upload(photo).await?),
                None => None,
            };
            api.register(RegisterRequest {
                username: values.name.trim().to_string(),
                email: values.email.trim().to_string(),
                password: values.password,
                profile_photo,
            })
            .await
        })
        .await;

        if done.is_some() {
            self.navigator.navigate(&AppRoute::Home.to_path());
        }
        done.is_some()
    }

    // =========================================================
    // 博客
    // =========================================================

    /// 发布博客：有文件先上传，再提交元数据，成功后回到列表
    pub async fn create_blog<S>(&self, form: &S, author: Option<&AuthUser>) -> bool
    where
        S: FormStore<BlogDraft>,
    {
        let api = self.api();
        let host = self.image_host();
        let done = submit_form(form, |draft: BlogDraft| async move {
            let image = resolve_image(&host, &draft).await?;
            api.create_blog(draft_payload(&draft, image, author)).await
        })
        .await;

        if done.is_some() {
            self.navigator.navigate(&AppRoute::Blog.to_path());
        }
        done.is_some()
    }

    /// 保存编辑，成功后进入文章详情
    pub async fn update_blog<S>(&self, form: &S, id: &str, original: &BlogPost) -> bool
    where
        S: FormStore<BlogDraft>,
    {
        let api = self.api();
        let host = self.image_host();
        let done = submit_form(form, |draft: BlogDraft| async move {
            let image = resolve_image(&host, &draft).await?;
            let mut payload = original.to_payload();
            payload.title = draft.title.trim().to_string();
            payload.description = format_description(&draft.description);
            payload.category = draft.category;
            payload.image = image;
            api.update_blog(id, payload).await
        })
        .await;

        if done.is_some() {
            self.navigator
                .navigate(&AppRoute::BlogPost(id.to_string()).to_path());
        }
        done.is_some()
    }

    /// 删除博客（调用方负责确认和本地移除）
    pub async fn delete_blog(&self, id: &str) -> ApiResult<()> {
        self.api().delete_blog(id).await?;
        log::info!("Deleted blog post {}", id);
        Ok(())
    }
}

async fn resolve_image<C: HttpClient>(host: &ImageHost<'_, C>, draft: &BlogDraft) -> ApiResult<String> {
    match &draft.image_file {
        Some(file) => host.upload(file).await,
        None => Ok(draft.image_url.trim().to_string()),
    }
}

fn draft_payload(draft: &BlogDraft, image: String, author: Option<&AuthUser>) -> BlogPayload {
    BlogPayload {
        title: draft.title.trim().to_string(),
        description: format_description(&draft.description),
        content: String::new(),
        image,
        category: draft.category.clone(),
        user_id: author.map(|a| a.id.clone()).filter(|id| !id.is_empty()),
        user_name: author
            .map(|a| a.username.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or("Anonymous")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpBody, MockHttpClient};
    use khelmela_shared::form::ValidationMode;
    use khelmela_shared::{Role, Session};
    use serde_json::json;
    use std::cell::RefCell;

    const BASE: &str = "https://api.test";
    const UPLOAD: &str = "https://api.cloudinary.com/v1_1/demo/image/upload";

    #[derive(Default)]
    struct MockNavigator {
        visited: RefCell<Vec<String>>,
    }

    impl Navigator for MockNavigator {
        fn navigate(&self, path: &str) {
            self.visited.borrow_mut().push(path.to_string());
        }
    }

    /// 模拟组件已卸载的表单
    struct DisposedForm<M>(RefCell<Option<FormState<M>>>);

    impl<M> FormStore<M> for DisposedForm<M> {
        fn with_form<R>(&self, f: impl FnOnce(&mut FormState<M>) -> R) -> Option<R> {
            self.0.borrow_mut().as_mut().map(f)
        }
    }

    fn config() -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: BASE.into(),
            cloud_name: "demo".into(),
            upload_preset: "preset".into(),
        }
    }

    fn author() -> AuthUser {
        AuthUser {
            id: "u1".into(),
            username: "Alex".into(),
            email: "alex@example.com".into(),
            token: "tok".into(),
            role: Some(Role::User),
            avatar_url: None,
            created_at: None,
        }
    }

    fn valid_draft() -> BlogDraft {
        BlogDraft {
            title: "Free Fire Season Recap".into(),
            description: "x".repeat(60),
            image_url: "https://cdn.example.com/cover.jpg".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_blog_creator_end_to_end() {
        let client = MockHttpClient::new();
        client.mock_response("https://api.test/api/blogs", 201, json!({ "success": true }));
        let nav = MockNavigator::default();
        let cfg = config();
        let user = author();
        let flow = FlowContext::new(&client, &cfg, &nav).with_token(Some("tok"));

        let form = RefCell::new(FormState::<BlogDraft>::new(ValidationMode::Eager));
        form.borrow_mut().load(valid_draft());
        assert!(form.borrow().can_submit());

        assert!(flow.create_blog(&form, Some(&user)).await);

        assert_eq!(*nav.visited.borrow(), vec!["/blog".to_string()]);
        let form = form.borrow();
        assert_eq!(form.values, BlogDraft::default());
        assert!(!form.submitting);
        assert!(form.form_error.is_none());

        let sent = client.sent_to("https://api.test/api/blogs");
        assert_eq!(sent.len(), 1);
        let body: serde_json::Value = serde_json::from_str(sent[0].json_body().unwrap()).unwrap();
        assert_eq!(body["title"], "Free Fire Season Recap");
        assert_eq!(body["description"], format!("<p>{}</p>", "x".repeat(60)));
        assert_eq!(body["image"], "https://cdn.example.com/cover.jpg");
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["user_name"], "Alex");
        assert_eq!(sent[0].header("Authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_blog_creator_uploads_file_first() {
        let client = MockHttpClient::new();
        client.mock_response(UPLOAD, 200, json!({ "url": "http://res/cover.png" }));
        client.mock_response("https://api.test/api/blogs", 200, json!({}));
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav);

        let mut draft = valid_draft();
        draft.image_url.clear();
        draft.image_file = Some(ImageFile {
            name: "cover.png".into(),
            content_type: "image/png".into(),
            bytes: vec![1, 2, 3],
        });
        let form = RefCell::new(FormState::with_values(draft, ValidationMode::Eager));

        assert!(flow.create_blog(&form, None).await);

        let requests = client.requests.borrow();
        assert_eq!(requests[0].url, UPLOAD);
        assert!(matches!(requests[0].body, Some(HttpBody::Multipart(_))));
        let body: serde_json::Value =
            serde_json::from_str(requests[1].json_body().unwrap()).unwrap();
        assert_eq!(body["image"], "http://res/cover.png");
        assert_eq!(body["user_name"], "Anonymous");
    }

    #[tokio::test]
    async fn test_invalid_draft_sends_nothing() {
        let client = MockHttpClient::new();
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav);

        let mut draft = valid_draft();
        draft.description = "x".repeat(49);
        let form = RefCell::new(FormState::with_values(draft, ValidationMode::Eager));

        assert!(!flow.create_blog(&form, None).await);
        assert!(client.requests.borrow().is_empty());
        assert!(nav.visited.borrow().is_empty());
        assert!(form.borrow().errors.has("description"));
    }

    #[tokio::test]
    async fn test_failure_fills_form_error_and_reenables() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.test/api/blogs",
            400,
            json!({ "message": "Title already used" }),
        );
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav);
        let form = RefCell::new(FormState::with_values(valid_draft(), ValidationMode::Eager));

        assert!(!flow.create_blog(&form, None).await);
        let form = form.borrow();
        assert_eq!(form.form_error.as_deref(), Some("Title already used"));
        assert!(!form.submitting);
        assert_eq!(form.values, valid_draft());
        assert!(nav.visited.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_disposed_form_ignores_late_result() {
        let client = MockHttpClient::new();
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav);

        let form: DisposedForm<BlogDraft> = DisposedForm(RefCell::new(None));
        assert!(!flow.create_blog(&form, None).await);
        assert!(client.requests.borrow().is_empty());
        assert!(nav.visited.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_login_writes_session_and_navigates() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.test/api/login",
            200,
            json!({ "_id": "u9", "username": "Admin", "email": "a@b.co", "token": "t", "admin": "admin" }),
        );
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav);
        let session = RefCell::new(Session::default());

        let form = RefCell::new(FormState::<LoginForm>::new(ValidationMode::OnSubmit));
        form.borrow_mut().edit("email", |v: &mut LoginForm| v.email = "a@b.co".into());
        form.borrow_mut().edit("password", |v: &mut LoginForm| v.password = "secret".into());

        assert!(flow.login(&form, &session).await);
        assert!(session.borrow().is_logged_in());
        assert!(session.borrow().access().is_admin());
        assert_eq!(*nav.visited.borrow(), vec!["/blog".to_string()]);
    }

    #[tokio::test]
    async fn test_login_without_token_is_refused() {
        let client = MockHttpClient::new();
        client.mock_response(
            "https://api.test/api/login",
            200,
            json!({ "_id": "u9", "username": "x", "token": "" }),
        );
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav);
        let session = RefCell::new(Session::default());
        let form = RefCell::new(FormState::with_values(
            LoginForm {
                email: "a@b.co".into(),
                password: "secret".into(),
            },
            ValidationMode::OnSubmit,
        ));

        assert!(!flow.login(&form, &session).await);
        assert!(!session.borrow().is_logged_in());
        assert!(form.borrow().form_error.is_some());
        assert!(nav.visited.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_signup_uploads_photo_then_registers() {
        let client = MockHttpClient::new();
        client.mock_response(UPLOAD, 200, json!({ "url": "http://res/me.png" }));
        client.mock_response("https://api.test/api/register", 201, json!({ "ok": true }));
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav).with_token(Some("admin-token"));

        let form = RefCell::new(FormState::with_values(
            SignupForm {
                name: "Sita".into(),
                email: "sita@khelmela.com".into(),
                password: "12345678".into(),
                confirm_password: "12345678".into(),
                photo: Some(ImageFile {
                    name: "me.png".into(),
                    content_type: "image/png".into(),
                    bytes: vec![9],
                }),
            },
            ValidationMode::OnSubmit,
        ));

        assert!(flow.signup(&form).await);
        assert_eq!(*nav.visited.borrow(), vec!["/".to_string()]);
        let sent = client.sent_to("https://api.test/api/register");
        let body: serde_json::Value = serde_json::from_str(sent[0].json_body().unwrap()).unwrap();
        assert_eq!(body["profilePhoto"], "http://res/me.png");
        assert_eq!(body["username"], "Sita");
    }

    #[tokio::test]
    async fn test_update_blog_keeps_original_fields() {
        let client = MockHttpClient::new();
        client.mock_raw("https://api.test/api/blogs/b1", 200, "");
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav).with_token(Some("tok"));

        let original: BlogPost = serde_json::from_value(json!({
            "_id": "b1",
            "title": "Old",
            "description": "<p>old</p>",
            "image": "https://x/old.png",
            "category": "pubg",
            "user_id": "u1",
            "user_name": "Alex"
        }))
        .unwrap();
        let mut draft = valid_draft();
        draft.category = "pubg".into();
        let form = RefCell::new(FormState::with_values(draft, ValidationMode::Eager));

        assert!(flow.update_blog(&form, "b1", &original).await);
        assert_eq!(*nav.visited.borrow(), vec!["/blog-page/b1".to_string()]);

        let sent = client.sent_to("https://api.test/api/blogs/b1");
        let body: serde_json::Value = serde_json::from_str(sent[0].json_body().unwrap()).unwrap();
        assert_eq!(body["title"], "Free Fire Season Recap");
        assert_eq!(body["user_id"], "u1");
        assert_eq!(body["user_name"], "Alex");
        assert_eq!(body["image"], "https://cdn.example.com/cover.jpg");
    }

    #[tokio::test]
    async fn test_editing_published_post_keeps_rich_description() {
        let client = MockHttpClient::new();
        client.mock_raw("https://api.test/api/blogs/b2", 200, "");
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav).with_token(Some("tok"));

        let rich = "<p>Top picks:</p><ul><li>PUBG</li><li>Free Fire</li></ul><h2>Rules</h2><p>Be fair</p>";
        let original: BlogPost = serde_json::from_value(json!({
            "_id": "b2",
            "title": "Weekend picks",
            "description": rich,
            "image": "https://images.unsplash.com/photo-1542751371?w=800",
            "category": "games",
            "user_name": "Alex"
        }))
        .unwrap();

        let form = RefCell::new(FormState::<BlogDraft>::new(ValidationMode::Eager));
        form.borrow_mut().load(BlogDraft::from_post(&original));
        form.borrow_mut().edit("title", |d: &mut BlogDraft| d.title = "Weekend picks (updated)".into());
        assert!(form.borrow().can_submit());

        assert!(flow.update_blog(&form, "b2", &original).await);
        assert_eq!(*nav.visited.borrow(), vec!["/blog-page/b2".to_string()]);

        let sent = client.sent_to("https://api.test/api/blogs/b2");
        let body: serde_json::Value = serde_json::from_str(sent[0].json_body().unwrap()).unwrap();
        assert_eq!(body["title"], "Weekend picks (updated)");
        assert_eq!(body["description"], rich);
        assert_eq!(body["image"], "https://images.unsplash.com/photo-1542751371?w=800");
    }

    #[tokio::test]
    async fn test_editing_short_paragraph_post_saves() {
        let client = MockHttpClient::new();
        client.mock_raw("https://api.test/api/blogs/b3", 200, "");
        let nav = MockNavigator::default();
        let cfg = config();
        let flow = FlowContext::new(&client, &cfg, &nav).with_token(Some("tok"));

        let original: BlogPost = serde_json::from_value(json!({
            "_id": "b3",
            "title": "Patch",
            "description": "<p>Short news blurb.</p><p>More soon.</p>",
            "image": "https://res.cloudinary.com/demo/image/upload/cover.avif"
        }))
        .unwrap();
        let form = RefCell::new(FormState::with_values(
            BlogDraft::from_post(&original),
            ValidationMode::Eager,
        ));

        assert!(flow.update_blog(&form, "b3", &original).await);
        let sent = client.sent_to("https://api.test/api/blogs/b3");
        let body: serde_json::Value = serde_json::from_str(sent[0].json_body().unwrap()).unwrap();
        assert_eq!(body["description"], "<p>Short news blurb.</p><p>More soon.</p>");
        assert_eq!(body["image"], "https://res.cloudinary.com/demo/image/upload/cover.avif");
    }
}

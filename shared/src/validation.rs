//! 表单校验规则
//!
//! 每个表单模型实现 [`Validate`]，返回按字段名索引的错误表。
//! 长度一律按去除首尾空白后的字符数计算。

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::blog::{BlogPost, DEFAULT_BLOG_CATEGORY, is_blog_category};
use crate::sanitize::html_to_plain_text;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const LOGIN_MIN_PASSWORD: usize = 6;
pub const SIGNUP_MIN_PASSWORD: usize = 8;
pub const BLOG_TITLE_MAX: usize = 100;
pub const BLOG_DESCRIPTION_MIN: usize = 50;
/// 图片上传大小上限：5 MiB
pub const IMAGE_MAX_BYTES: usize = 5 * 1024 * 1024;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL pattern is valid"));

static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|gif|webp)$").expect("IMAGE_URL pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

pub fn is_valid_image_url(url: &str) -> bool {
    IMAGE_URL.is_match(url.trim())
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// =========================================================
// 错误表 (Field Errors)
// =========================================================

/// 字段名 -> 错误信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// 表单模型校验
pub trait Validate {
    fn validate(&self) -> FieldErrors;
}

// =========================================================
// 图片文件 (Image Files)
// =========================================================

/// 用户选择的图片文件（内容已读入内存）
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn check(&self) -> Result<(), ImageRejection> {
        check_image_file(&self.content_type, self.size())
    }
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// 图片在上传前被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRejection {
    NotAnImage,
    TooLarge,
}

impl fmt::Display for ImageRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnImage => write!(f, "Please upload a valid image file"),
            Self::TooLarge => write!(f, "Image must be smaller than 5MB"),
        }
    }
}

/// MIME 类型必须以 `image/` 开头，大小不超过 5 MiB
pub fn check_image_file(content_type: &str, size: usize) -> Result<(), ImageRejection> {
    if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(ImageRejection::NotAnImage);
    }
    if size > IMAGE_MAX_BYTES {
        return Err(ImageRejection::TooLarge);
    }
    Ok(())
}

// =========================================================
// 表单模型 (Form Models)
// =========================================================

fn check_email(errors: &mut FieldErrors, field: &'static str, email: &str) {
    if is_blank(email) {
        errors.set(field, "Email is required");
    } else if !is_valid_email(email) {
        errors.set(field, "Please enter a valid email address");
    }
}

/// 登录表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Validate for LoginForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, "email", &self.email);
        if self.password.is_empty() {
            errors.set("password", "Password is required");
        } else if self.password.chars().count() < LOGIN_MIN_PASSWORD {
            errors.set("password", "Password must be at least 6 characters");
        }
        errors
    }
}

/// 注册（创建账号）表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub photo: Option<ImageFile>,
}

impl Validate for SignupForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if is_blank(&self.name) {
            errors.set("name", "Name is required");
        }
        check_email(&mut errors, "email", &self.email);
        if self.password.is_empty() {
            errors.set("password", "Password is required");
        } else if self.password.chars().count() < SIGNUP_MIN_PASSWORD {
            errors.set("password", "Password must be at least 8 characters long");
        }
        if self.confirm_password.is_empty() {
            errors.set("confirm_password", "Please confirm your password");
        } else if self.confirm_password != self.password {
            errors.set("confirm_password", "Passwords do not match");
        }
        if let Some(Err(rejection)) = self.photo.as_ref().map(ImageFile::check) {
            errors.set("photo", rejection.to_string());
        }
        errors
    }
}

/// 草稿来源，决定适用的校验规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftKind {
    /// 新建：完整规则
    #[default]
    New,
    /// 编辑已发布的文章：只要求标题和内容
    Existing,
}

/// 博客草稿（创建与编辑共用）
#[derive(Debug, Clone, PartialEq)]
pub struct BlogDraft {
    pub kind: DraftKind,
    pub title: String,
    /// 纯文本，按行分段
    pub description: String,
    pub category: String,
    pub image_url: String,
    /// 选中后在提交时上传
    pub image_file: Option<ImageFile>,
}

impl Default for BlogDraft {
    fn default() -> Self {
        Self {
            kind: DraftKind::New,
            title: String::new(),
            description: String::new(),
            category: DEFAULT_BLOG_CATEGORY.to_string(),
            image_url: String::new(),
            image_file: None,
        }
    }
}

impl BlogDraft {
    /// 载入已发布的文章供编辑
    ///
    /// 段落描述还原为纯文本；含其他标签的描述原样保留。
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            kind: DraftKind::Existing,
            title: post.title.clone().unwrap_or_default(),
            description: html_to_plain_text(&post.description),
            category: post
                .category
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BLOG_CATEGORY.to_string()),
            image_url: post.image.clone().unwrap_or_default(),
            image_file: None,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image_file.is_some() || !is_blank(&self.image_url)
    }

    /// 表单中展示的封面
    ///
    /// 本地预览只在文件暂存或正在上传时有效；上传失败后回到草稿里的地址。
    pub fn preview_image(&self, local: Option<String>, uploading: bool) -> Option<String> {
        let pending = uploading || self.image_file.is_some();
        local
            .filter(|_| pending)
            .or_else(|| Some(self.image_url.trim().to_string()).filter(|u| !u.is_empty()))
    }
}

impl Validate for BlogDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if is_blank(&self.title) {
            errors.set("title", "Title is required");
        } else if char_len(&self.title) > BLOG_TITLE_MAX {
            errors.set("title", "Title must be less than 100 characters");
        }

        if is_blank(&self.description) {
            errors.set("description", "Content is required");
        } else if self.kind == DraftKind::New && char_len(&self.description) < BLOG_DESCRIPTION_MIN {
            errors.set("description", "Content must be at least 50 characters");
        }

        // 已有文章的图片地址和图床返回的地址不做扩展名检查
        match (&self.image_file, self.kind) {
            (Some(file), _) => {
                if let Err(rejection) = file.check() {
                    errors.set("image", rejection.to_string());
                }
            }
            (None, DraftKind::Existing) => {}
            (None, DraftKind::New) if is_blank(&self.image_url) => {
                errors.set("image", "Please upload an image or provide an image URL");
            }
            (None, DraftKind::New) if !is_valid_image_url(&self.image_url) => {
                errors.set("image", "Please enter a valid image URL");
            }
            (None, DraftKind::New) => {}
        }

        if self.kind == DraftKind::New && !is_blog_category(&self.category) {
            errors.set("category", "Please select a category");
        }
        errors
    }
}

/// 首页联系表单（仅本地校验）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Validate for ContactForm {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if is_blank(&self.name) {
            errors.set("name", "Name is required");
        }
        check_email(&mut errors, "email", &self.email);
        if is_blank(&self.message) {
            errors.set("message", "Message is required");
        }
        errors
    }
}

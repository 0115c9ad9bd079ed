// =========================================================
// 动态运行时配置 (Runtime Configuration)
// =========================================================

/// 这些是默认值，构建环境中没有定义对应变量时使用
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_CLOUD_NAME: &str = "dur5g9bjk";
pub const DEFAULT_UPLOAD_PRESET: &str = "test_khel";

pub const VAR_API_BASE_URL: &str = "KHELMELA_API_BASE_URL";
pub const VAR_CLOUD_NAME: &str = "KHELMELA_CLOUD_NAME";
pub const VAR_UPLOAD_PRESET: &str = "KHELMELA_UPLOAD_PRESET";

/// 运行时配置结构体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// 不带末尾斜杠
    pub api_base_url: String,
    pub cloud_name: String,
    pub upload_preset: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl RuntimeConfig {
    /// 通过查找函数读取变量，读不到或为空时使用默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_base_url: read(VAR_API_BASE_URL, DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            cloud_name: read(VAR_CLOUD_NAME, DEFAULT_CLOUD_NAME),
            upload_preset: read(VAR_UPLOAD_PRESET, DEFAULT_UPLOAD_PRESET),
        }
    }

    /// 浏览器构建：变量在编译期固化
    pub fn from_build_env() -> Self {
        Self::from_lookup(|name| {
            let value = match name {
                VAR_API_BASE_URL => option_env!("KHELMELA_API_BASE_URL"),
                VAR_CLOUD_NAME => option_env!("KHELMELA_CLOUD_NAME"),
                VAR_UPLOAD_PRESET => option_env!("KHELMELA_UPLOAD_PRESET"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// 拼接 API 地址
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// 图床上传地址
    pub fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset_or_blank() {
        let vars: HashMap<&str, &str> = HashMap::from([(VAR_CLOUD_NAME, "  ")]);
        let cfg = RuntimeConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(cfg.cloud_name, DEFAULT_CLOUD_NAME);
        assert_eq!(cfg.upload_preset, DEFAULT_UPLOAD_PRESET);
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (VAR_API_BASE_URL, "https://api.khelmela.com///"),
            (VAR_CLOUD_NAME, "demo"),
        ]);
        let cfg = RuntimeConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.api_base_url, "https://api.khelmela.com");
        assert_eq!(cfg.api_url("/api/blogs"), "https://api.khelmela.com/api/blogs");
        assert_eq!(
            cfg.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }
}

//! # 应用配置数据模型
//!
//! 定义了 OllamaNotes 应用配置（PluginConfig）的 Rust 结构体，
//! 对应前端 TypeScript 中的 `PluginConfig` 接口。
//!
//! 配置作为单个 JSON 对象存储在 `~/.mo/OllamaNotes/config.json` 中，
//! 启动时加载一次到内存（见 `services::store`），每次修改后整体写回。

use serde::{Deserialize, Serialize};

use crate::models::prompt::Prompt;

/// Ollama 服务的默认地址
///
/// Ollama 本地安装后默认监听 11434 端口。
pub const DEFAULT_SERVICE_BASE_URL: &str = "http://localhost:11434";

/// 默认模型名称
///
/// 仅作为首次启动时的占位默认值，用户可在设置面板中
/// 从模型下拉列表选择或手动输入覆盖。
pub const DEFAULT_MODEL_NAME: &str = "llama3.1";

/// 应用配置数据结构
///
/// 管理提示词列表和服务连接参数的顶层容器。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface PluginConfig {
///   prompts: Prompt[];
///   defaultModelName: string;
///   serviceBaseUrl: string;
///   lastUsedPromptId: string | null;
/// }
/// ```
///
/// 注意：`lastUsedPromptId` 是弱引用（仅存 id，不存对象），
/// 使用时必须重新按 id 查找。被引用的提示词可能已被编辑或删除，
/// 查找失败时按「没有上次提示词」处理，不视为配置损坏。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// 所有已保存的提示词模板，保持用户定义的顺序
    #[serde(default)]
    pub prompts: Vec<Prompt>,

    /// 默认模型名称：处理笔记时使用的 Ollama 模型
    #[serde(default = "default_model_name")]
    pub default_model_name: String,

    /// Ollama 服务的基础地址（如 `http://localhost:11434`）
    #[serde(default = "default_service_base_url")]
    pub service_base_url: String,

    /// 上次处理笔记时使用的提示词 id：为 `null`（None）表示尚未使用过
    #[serde(default)]
    pub last_used_prompt_id: Option<String>,
}

/// serde 默认值函数：默认模型名称
fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

/// serde 默认值函数：默认服务地址
fn default_service_base_url() -> String {
    DEFAULT_SERVICE_BASE_URL.to_string()
}

/// PluginConfig 默认值：空提示词列表 + 本地 Ollama 默认地址
impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            prompts: vec![],
            default_model_name: default_model_name(),
            service_base_url: default_service_base_url(),
            last_used_prompt_id: None,
        }
    }
}

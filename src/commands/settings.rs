//! # 应用配置 Tauri Commands
//!
//! 提供配置读写和模型列表的 Tauri command 处理函数：
//! - `get_config` - 获取当前完整配置（前端启动和设置面板打开时调用）
//! - `save_config` - 保存完整配置（设置面板的服务地址 / 默认模型修改）
//! - `list_models` - 获取 Ollama 已安装模型列表（设置面板下拉框）
//!
//! 所有配置存储在 `~/.mo/OllamaNotes/config.json` 中，
//! 启动时由 `ConfigStore` 加载一次，每次修改后整体写回。

use tauri::State;

use crate::models::settings::PluginConfig;
use crate::services::ollama::OllamaClient;
use crate::services::store::ConfigStore;

/// 获取当前完整配置
///
/// 前端在应用启动时调用此 command 获取配置快照，
/// 设置面板和提示词管理界面均以此为初始数据。
///
/// # 返回值
/// 当前配置的克隆（含提示词列表、服务地址、默认模型等）
///
/// # 错误
/// 配置锁不可用时返回错误信息（极端情况）
#[tauri::command]
pub async fn get_config(store: State<'_, ConfigStore>) -> Result<PluginConfig, String> {
    store.snapshot().map_err(String::from)
}

/// 保存完整配置
///
/// 设置面板提交时调用：用前端传入的配置对象整体替换内存态，
/// 并立即持久化到磁盘。
///
/// # 参数
/// - `config` - 要保存的完整配置对象
///
/// # 错误
/// 配置锁不可用或文件写入失败时返回错误信息
#[tauri::command]
pub async fn save_config(
    store: State<'_, ConfigStore>,
    config: PluginConfig,
) -> Result<(), String> {
    let (_, snapshot) = store.update(|c| *c = config).map_err(String::from)?;
    ConfigStore::persist(&snapshot).await.map_err(String::from)
}

/// 获取 Ollama 已安装的模型名称列表
///
/// 设置面板用返回值渲染默认模型的下拉列表。
/// 调用失败（如 Ollama 未启动）时前端降级为自由文本输入框，
/// 设置面板本身不受阻塞。
///
/// # 返回值
/// 模型名称列表（含 tag，如 "llama3.1:latest"）
///
/// # 错误
/// Ollama 服务不可达或返回非成功状态码时返回错误信息
#[tauri::command]
pub async fn list_models(store: State<'_, ConfigStore>) -> Result<Vec<String>, String> {
    let config = store.snapshot().map_err(String::from)?;
    let client = OllamaClient::new(&config.service_base_url);
    client.list_models().await.map_err(String::from)
}

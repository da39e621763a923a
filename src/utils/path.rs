//! # 路径工具函数
//!
//! 提供与配置文件路径相关的工具函数：
//! - 获取 OllamaNotes 配置目录路径（`~/.mo/OllamaNotes/`）
//! - 获取配置文件完整路径（`~/.mo/OllamaNotes/config.json`）

use std::path::PathBuf;

/// 配置文件名
///
/// 整个应用的配置（提示词列表、服务地址、默认模型、上次使用的提示词 id）
/// 序列化为单个 JSON 文件存储。
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 获取 OllamaNotes 配置目录的绝对路径
///
/// 应用配置独立存储在 `~/.mo/OllamaNotes/` 目录下，
/// 不触碰用户笔记库中的任何文件。
/// 使用 `dirs` crate 获取跨平台的主目录路径。
///
/// # 返回值
/// 返回 `~/.mo/OllamaNotes/` 目录的绝对路径。
///
/// # 错误
/// 如果无法确定用户主目录（极端情况，如无 HOME 环境变量），返回错误信息。
///
/// # 示例
/// - Windows: `C:\Users\username\.mo\OllamaNotes`
/// - Linux/macOS: `/home/username/.mo/OllamaNotes`
pub fn get_config_dir() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or_else(|| "无法获取用户主目录".to_string())?;
    Ok(home.join(".mo").join("OllamaNotes"))
}

/// 获取配置文件的完整绝对路径
///
/// # 返回值
/// 返回 `~/.mo/OllamaNotes/config.json` 的绝对路径。
///
/// # 错误
/// 如果无法确定用户主目录，返回错误信息。
pub fn get_config_file_path() -> Result<PathBuf, String> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

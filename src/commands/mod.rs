//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数。
//! 每个子模块对应一个功能域：
//! - `settings` - 应用配置读写和模型列表相关 commands
//! - `prompts` - 提示词目录的增删改查和导入导出 commands
//! - `process` - 笔记处理工作流相关 commands（按提示词处理 / 重跑上次）

pub mod process;
pub mod prompts;
pub mod settings;

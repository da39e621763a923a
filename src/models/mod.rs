//! # 数据模型模块
//!
//! 定义了与前端 TypeScript 类型一一对应的 Rust 数据结构。
//! 所有结构体均派生 `Serialize` 和 `Deserialize`，用于 Tauri IPC 传输和 JSON 文件读写。
//! - `prompt` - 提示词模板的数据结构
//! - `settings` - 应用配置（提示词列表、服务地址、默认模型）的数据结构
//! - `ollama` - Ollama HTTP 接口的请求/响应数据结构

pub mod ollama;
pub mod prompt;
pub mod settings;

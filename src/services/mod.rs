//! # 业务逻辑服务模块
//!
//! 包含核心业务逻辑的实现，与 Tauri command 层解耦：
//! - `store` - 配置存储（内存态 + JSON 文件持久化）
//! - `ollama` - Ollama 生成客户端（模型列表 / 元数据 / 文本生成）
//! - `catalog` - 提示词目录的增删改查和批量导入导出
//! - `workflow` - 笔记处理工作流（入口校验、合并提示词、请求与格式化）
//! - `formatter` - 替换文档的组装（AI Notes / Original Transcript 结构）

pub mod catalog;
pub mod formatter;
pub mod ollama;
pub mod store;
pub mod workflow;

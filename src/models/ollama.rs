//! # Ollama HTTP 接口数据模型
//!
//! 定义了与本地 Ollama 服务交互的请求/响应结构体，
//! 字段与 Ollama 的 JSON 接口一一对应：
//! - `GET /api/tags` → [`ModelListResponse`]
//! - `POST /api/show` → [`ShowRequest`] / [`ShowResponse`]
//! - `POST /api/generate` → [`GenerateRequest`] / [`GenerateResponse`]
//!
//! 这些结构体都是瞬态数据：随一次调用创建、随调用结束丢弃，
//! 不参与配置持久化（模型元数据也不做跨调用缓存）。

use serde::{Deserialize, Serialize};

/// `GET /api/tags` 的响应：本地已安装的模型列表
#[derive(Debug, Deserialize)]
pub struct ModelListResponse {
    /// 已安装模型的条目列表
    pub models: Vec<ModelListEntry>,
}

/// 模型列表中的单个条目
///
/// Ollama 还会返回 `modified_at`、`size` 等字段，
/// 本应用仅消费 `name`，其余字段在反序列化时忽略。
#[derive(Debug, Deserialize)]
pub struct ModelListEntry {
    /// 模型名称（含 tag，如 "llama3.1:latest"）
    pub name: String,
}

/// `POST /api/show` 的请求体：按名称查询模型元数据
#[derive(Debug, Serialize)]
pub struct ShowRequest<'a> {
    /// 要查询的模型名称
    pub name: &'a str,
}

/// `POST /api/show` 的响应
#[derive(Debug, Deserialize)]
pub struct ShowResponse {
    /// 模型参数块，包含上下文长度等信息
    #[serde(default)]
    pub parameters: ModelParameters,
}

/// 模型参数块
#[derive(Debug, Default, Deserialize)]
pub struct ModelParameters {
    /// 上下文长度上限（token 数）
    ///
    /// 缺失时反序列化为 0，表示「未知」，预检时跳过长度拦截
    /// （预检本身是启发式的提前拦截，缺少上限信息时不应阻断生成）。
    #[serde(default)]
    pub context_length: u64,
}

/// 模型元数据
///
/// 从 [`ShowResponse`] 提炼出的、生成流程真正需要的信息。
/// 每次生成调用前重新获取，不跨调用缓存。
#[derive(Debug, Clone, Copy)]
pub struct ModelMetadata {
    /// 上下文长度上限（token 数），0 表示未知
    pub context_length: u64,
}

/// `POST /api/generate` 的请求体
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    /// 使用的模型名称
    pub model: &'a str,

    /// 完整的提示词文本（模板正文 + 分隔标记包裹的笔记原文）
    pub prompt: &'a str,

    /// 系统指令（可选），设定模型角色/行为
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<&'a str>,

    /// 固定为 false：本应用不使用流式输出，一次性取回完整响应
    pub stream: bool,
}

/// `POST /api/generate` 的响应
///
/// Ollama 还会返回 `model`、`created_at`、`done` 等字段，
/// 本应用仅消费生成文本 `response`。
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    /// 模型生成的文本
    pub response: String,
}

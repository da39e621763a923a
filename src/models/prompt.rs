//! # 提示词模板数据模型
//!
//! 定义了提示词模板（Prompt）的 Rust 结构体，
//! 对应前端 TypeScript 中的 `Prompt` 接口。
//!
//! 提示词模板是一组可复用的指令：正文（body）描述要对笔记文本执行的任务，
//! 可选的系统指令（systemInstruction）设定模型的角色和行为，
//! 与任务正文分开发送给 Ollama 服务。

use serde::{Deserialize, Serialize};

/// 提示词模板数据结构
///
/// 保存在应用配置的 `prompts` 有序列表中，随配置一同持久化。
/// 不变量：`id` 在列表内唯一；保存后的 `name` 和 `body` 非空。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Prompt {
///   id: string;
///   name: string;
///   body: string;
///   systemInstruction?: string;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    /// 唯一标识符：由毫秒时间戳和进程内序号组合生成
    pub id: String,

    /// 提示词名称：用户自定义的可读名称（如 "会议纪要整理"）
    pub name: String,

    /// 提示词正文：描述要对笔记文本执行的任务，
    /// 原文会以分隔标记包裹后拼接在正文之后
    pub body: String,

    /// 系统指令：设定模型角色/行为的文本（可选），
    /// 作为独立的 system 字段发送，不混入任务正文
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
}

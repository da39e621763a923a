//! # 文档格式化服务
//!
//! 将生成结果和笔记原文组装为固定结构的替换文档：
//!
//! ```markdown
//! ## AI Notes
//!
//! <模型生成的文本>
//!
//! ## Original Transcript
//!
//! > [!quote]- 原文
//! > <原文第 1 行>
//! > <原文第 2 行>
//! ```
//!
//! 原文的每一行都加上引用块标记 `> ` 后放入可折叠的 callout 块中，
//! 行序保持不变——去掉前缀即可无损还原原文。
//! 生成的文档整体替换当前笔记内容，光标定位到 AI Notes 区域的起始行。

use serde::Serialize;

/// AI 笔记区域的标题行
pub const AI_NOTES_HEADING: &str = "## AI Notes";

/// 原文区域的标题行
pub const ORIGINAL_HEADING: &str = "## Original Transcript";

/// 可折叠 callout 块的首行（`-` 后缀表示默认折叠）
const CALLOUT_HEADER: &str = "> [!quote]- 原文";

/// 引用块标记前缀
const QUOTE_PREFIX: &str = "> ";

/// 处理成功后的替换文档
///
/// 通过 IPC 返回给前端：前端用 `content` 整体替换当前笔记内容，
/// 并把光标移动到 `cursorLine` 指定的行首。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface ProcessedDocument {
///   content: string;
///   cursorLine: number;
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocument {
    /// 替换后的完整文档内容
    pub content: String,

    /// 光标应定位到的行号（从 0 开始计），
    /// 指向 AI Notes 标题之后生成内容的第一行
    pub cursor_line: u32,
}

/// 组装替换文档
///
/// # 参数
/// - `generated` - 模型生成的文本
/// - `original` - 笔记原文（逐行加引用前缀后放入折叠块）
///
/// # 返回值
/// 完整的 `ProcessedDocument`（文档内容 + 光标行号）
pub fn render_document(generated: &str, original: &str) -> ProcessedDocument {
    let mut lines: Vec<String> = Vec::new();

    // ---- AI Notes 区域 ----
    lines.push(AI_NOTES_HEADING.to_string());
    lines.push(String::new());
    // 光标定位到生成内容的第一行（标题 + 空行之后）
    let cursor_line = lines.len() as u32;
    for line in generated.lines() {
        lines.push(line.to_string());
    }

    // ---- Original Transcript 区域 ----
    lines.push(String::new());
    lines.push(ORIGINAL_HEADING.to_string());
    lines.push(String::new());
    lines.push(CALLOUT_HEADER.to_string());
    for line in original.lines() {
        lines.push(quote_line(line));
    }

    ProcessedDocument {
        content: lines.join("\n"),
        cursor_line,
    }
}

/// 为单行文本加上引用块标记
///
/// 空行输出裸的 `>`（不带尾随空格），与常见 Markdown 编辑器的行为一致。
fn quote_line(line: &str) -> String {
    if line.is_empty() {
        ">".to_string()
    } else {
        format!("{}{}", QUOTE_PREFIX, line)
    }
}

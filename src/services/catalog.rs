//! # 提示词目录服务
//!
//! 对配置中的提示词有序列表（`Vec<Prompt>`）执行增删改查和批量导入导出。
//! 目录规模为几十条量级，按 id 线性扫描即可，无需索引结构。
//!
//! ## 导入语义
//! 导入是全有或全无的：先解析并校验每一条记录（`id`、`name`、`body`
//! 均须非空），任何一条不合格都会使整个导入以 `InvalidImportFormat`
//! 失败，现有目录保持原样，不存在部分应用。
//! - `merge` 模式：跳过 id 与现有条目冲突的记录，其余追加
//! - `replace` 模式：丢弃现有目录，整体替换为导入列表

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::models::prompt::Prompt;
use crate::utils::error::ProcessError;

/// 进程内 id 序号计数器
///
/// 与毫秒时间戳组合生成提示词 id，保证同一毫秒内连续创建也不冲突。
/// 单用户交互场景下时间戳冲突概率本就极低，计数器只是兜底。
static ID_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// 批量导入模式
///
/// 对应前端导入对话框的两个选项，IPC 传输时序列化为小写字符串。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// 丢弃现有目录，整体替换为导入列表
    Replace,
    /// 保留现有目录，跳过 id 冲突的记录后追加其余记录
    Merge,
}

/// 生成新的提示词唯一 id
///
/// 格式：`prompt-{毫秒时间戳}-{进程内序号}`。
fn generate_prompt_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let seq = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("prompt-{}-{}", millis, seq)
}

/// 校验提示词的名称和正文非空
///
/// 创建、编辑、导入共用同一条不变量：保存后的提示词
/// `name` 和 `body` 必须非空（仅含空白字符视为空）。
fn validate_fields(name: &str, body: &str) -> Result<(), ProcessError> {
    if name.trim().is_empty() {
        return Err(ProcessError::Validation("提示词名称不能为空".to_string()));
    }
    if body.trim().is_empty() {
        return Err(ProcessError::Validation("提示词内容不能为空".to_string()));
    }
    Ok(())
}

/// 创建新提示词并追加到目录末尾
///
/// # 参数
/// - `prompts` - 目录列表
/// - `name` - 提示词名称
/// - `body` - 提示词正文
/// - `system_instruction` - 系统指令（可选，空白字符串按未设置处理）
///
/// # 返回值
/// 新建提示词的克隆（含生成的 id），用于 IPC 返回给前端
///
/// # 错误
/// 名称或正文为空时返回 `Validation` 错误。
pub fn create(
    prompts: &mut Vec<Prompt>,
    name: &str,
    body: &str,
    system_instruction: Option<&str>,
) -> Result<Prompt, ProcessError> {
    validate_fields(name, body)?;

    let prompt = Prompt {
        id: generate_prompt_id(),
        name: name.trim().to_string(),
        body: body.to_string(),
        system_instruction: normalize_system_instruction(system_instruction),
    };
    prompts.push(prompt.clone());
    Ok(prompt)
}

/// 按 id 更新提示词（原地替换字段，id 与列表位置不变）
///
/// # 参数
/// - `prompts` - 目录列表
/// - `id` - 要更新的提示词 id
/// - `name` / `body` / `system_instruction` - 新字段值
///
/// # 错误
/// - `NotFound` - id 不存在
/// - `Validation` - 名称或正文为空
pub fn update(
    prompts: &mut [Prompt],
    id: &str,
    name: &str,
    body: &str,
    system_instruction: Option<&str>,
) -> Result<(), ProcessError> {
    validate_fields(name, body)?;

    let entry = prompts
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| ProcessError::NotFound(id.to_string()))?;

    entry.name = name.trim().to_string();
    entry.body = body.to_string();
    entry.system_instruction = normalize_system_instruction(system_instruction);
    Ok(())
}

/// 按 id 删除提示词
///
/// id 不存在时静默无操作（删除操作天然幂等）。
/// 注意：不联动清理 `lastUsedPromptId` 的悬空引用，
/// 「重跑上次提示词」在查找失败时按「没有上次提示词」处理。
pub fn delete(prompts: &mut Vec<Prompt>, id: &str) {
    prompts.retain(|p| p.id != id);
}

/// 按 id 查找提示词
///
/// # 返回值
/// `Some(&Prompt)` 或 `None`（id 不存在时）
pub fn find<'a>(prompts: &'a [Prompt], id: &str) -> Option<&'a Prompt> {
    prompts.iter().find(|p| p.id == id)
}

/// 将目录导出为 JSON 字符串
///
/// 序列化为带 2 空格缩进的 JSON 数组，前端将其写入用户选择的文件。
///
/// # 错误
/// 序列化失败时返回 `Storage` 错误（实践中不会发生）。
pub fn export_json(prompts: &[Prompt]) -> Result<String, ProcessError> {
    serde_json::to_string_pretty(prompts)
        .map_err(|e| ProcessError::Storage(format!("序列化提示词列表失败: {}", e)))
}

/// 从 JSON 字符串批量导入提示词
///
/// 先完整解析并逐条校验，全部合格后才按模式修改目录（全有或全无）。
///
/// # 参数
/// - `prompts` - 目录列表
/// - `data` - JSON 数组字符串（`Prompt` 对象列表）
/// - `mode` - 导入模式（replace / merge）
///
/// # 返回值
/// 实际应用到目录的记录条数（merge 模式下被跳过的冲突记录不计入）
///
/// # 错误
/// JSON 解析失败，或任何一条记录的 `id`、`name`、`body` 为空时，
/// 返回 `InvalidImportFormat`，目录保持原样。
pub fn import_json(
    prompts: &mut Vec<Prompt>,
    data: &str,
    mode: ImportMode,
) -> Result<usize, ProcessError> {
    // ---- 阶段 1：解析 ----
    let incoming: Vec<Prompt> = serde_json::from_str(data)
        .map_err(|e| ProcessError::InvalidImportFormat(format!("JSON 解析失败: {}", e)))?;

    // ---- 阶段 2：逐条校验，任何一条不合格则整体失败 ----
    for (index, record) in incoming.iter().enumerate() {
        if record.id.trim().is_empty()
            || record.name.trim().is_empty()
            || record.body.trim().is_empty()
        {
            return Err(ProcessError::InvalidImportFormat(format!(
                "第 {} 条记录缺少必填字段（id/name/body 均不能为空）",
                index + 1
            )));
        }
    }

    // ---- 阶段 3：按模式应用 ----
    match mode {
        ImportMode::Replace => {
            let applied = incoming.len();
            *prompts = incoming;
            Ok(applied)
        }
        ImportMode::Merge => {
            let mut applied = 0;
            for record in incoming {
                // 跳过 id 冲突的记录：合并模式绝不覆盖现有条目
                if find(prompts, &record.id).is_none() {
                    prompts.push(record);
                    applied += 1;
                }
            }
            Ok(applied)
        }
    }
}

/// 规范化系统指令：空白字符串按未设置（None）处理
fn normalize_system_instruction(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 构造一条测试用提示词
    fn sample(id: &str, name: &str) -> Prompt {
        Prompt {
            id: id.to_string(),
            name: name.to_string(),
            body: "整理以下内容".to_string(),
            system_instruction: None,
        }
    }

    #[test]
    fn test_create_appends_with_unique_ids() {
        let mut prompts = vec![];
        let a = create(&mut prompts, "纪要", "整理以下内容", None).expect("创建应成功");
        let b = create(&mut prompts, "翻译", "翻译以下内容", Some("你是翻译助手"))
            .expect("创建应成功");

        assert_eq!(prompts.len(), 2);
        assert_ne!(a.id, b.id);
        assert_eq!(prompts[1].system_instruction.as_deref(), Some("你是翻译助手"));
    }

    #[test]
    fn test_create_rejects_empty_fields() {
        let mut prompts = vec![];
        let err = create(&mut prompts, "  ", "正文", None).expect_err("空名称应被拒绝");
        assert!(matches!(err, ProcessError::Validation(_)));

        let err = create(&mut prompts, "名称", "", None).expect_err("空正文应被拒绝");
        assert!(matches!(err, ProcessError::Validation(_)));
        assert!(prompts.is_empty());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut prompts = vec![sample("p-1", "旧名称"), sample("p-2", "另一条")];
        update(&mut prompts, "p-1", "新名称", "新正文", Some("新指令")).expect("更新应成功");

        // 位置与 id 不变，字段已替换
        assert_eq!(prompts[0].id, "p-1");
        assert_eq!(prompts[0].name, "新名称");
        assert_eq!(prompts[0].body, "新正文");
        assert_eq!(prompts[0].system_instruction.as_deref(), Some("新指令"));
        assert_eq!(prompts[1].name, "另一条");
    }

    #[test]
    fn test_update_missing_id_reports_not_found() {
        let mut prompts = vec![sample("p-1", "名称")];
        let err = update(&mut prompts, "p-404", "名称", "正文", None)
            .expect_err("缺失 id 应报错");
        assert!(matches!(err, ProcessError::NotFound(_)));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut prompts = vec![sample("p-1", "名称")];
        delete(&mut prompts, "p-1");
        assert!(prompts.is_empty());

        // 再次删除同一 id：静默无操作
        delete(&mut prompts, "p-1");
        assert!(prompts.is_empty());
    }

    #[test]
    fn test_find_by_id() {
        let prompts = vec![sample("p-1", "名称")];
        assert!(find(&prompts, "p-1").is_some());
        assert!(find(&prompts, "p-2").is_none());
    }

    #[test]
    fn test_export_import_replace_roundtrip() {
        let original = vec![sample("p-1", "纪要"), sample("p-2", "翻译")];
        let json = export_json(&original).expect("导出应成功");

        let mut target = vec![sample("p-old", "将被替换")];
        let applied =
            import_json(&mut target, &json, ImportMode::Replace).expect("导入应成功");

        // replace 模式：目录与导入列表完全一致
        assert_eq!(applied, 2);
        assert_eq!(target, original);
    }

    #[test]
    fn test_import_merge_skips_colliding_ids() {
        let mut target = vec![sample("p-1", "现有条目")];
        let json = export_json(&[sample("p-1", "冲突条目"), sample("p-2", "新条目")])
            .expect("导出应成功");

        let applied = import_json(&mut target, &json, ImportMode::Merge).expect("导入应成功");

        // 冲突记录被跳过，现有条目原样保留
        assert_eq!(applied, 1);
        assert_eq!(target.len(), 2);
        assert_eq!(target[0].name, "现有条目");
        assert_eq!(target[1].id, "p-2");
    }

    #[test]
    fn test_import_invalid_record_aborts_atomically() {
        let mut target = vec![sample("p-1", "现有条目")];
        let before = target.clone();

        // 第二条记录缺少 body 字段
        let data = r#"[
            { "id": "p-2", "name": "合格记录", "body": "正文" },
            { "id": "p-3", "name": "缺正文记录", "body": "" }
        ]"#;
        let err = import_json(&mut target, data, ImportMode::Merge)
            .expect_err("含非法记录的导入应整体失败");

        assert!(matches!(err, ProcessError::InvalidImportFormat(_)));
        // 目录完全未被修改（合格的第一条也未被应用）
        assert_eq!(target, before);
    }

    #[test]
    fn test_import_unparseable_json_aborts() {
        let mut target = vec![sample("p-1", "现有条目")];
        let before = target.clone();

        let err = import_json(&mut target, "不是 JSON", ImportMode::Replace)
            .expect_err("非法 JSON 应报错");
        assert!(matches!(err, ProcessError::InvalidImportFormat(_)));
        assert_eq!(target, before);
    }

    #[test]
    fn test_import_mode_deserializes_lowercase() {
        let mode: ImportMode = serde_json::from_str(r#""merge""#).expect("模式应能解析");
        assert_eq!(mode, ImportMode::Merge);
        let mode: ImportMode = serde_json::from_str(r#""replace""#).expect("模式应能解析");
        assert_eq!(mode, ImportMode::Replace);
    }
}

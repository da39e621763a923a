//! # 配置存储服务
//!
//! 管理应用配置（`PluginConfig`）的内存态和磁盘持久化：
//! - 启动时从 `~/.mo/OllamaNotes/config.json` 同步加载一次，
//!   文件不存在时使用默认配置，解析失败时记录警告并回落到默认配置
//!   （配置损坏不应导致应用不可用）
//! - 每次修改后将完整配置整体写回磁盘，不做批量合并或事务分组
//!
//! ## 线程安全
//! 使用 `std::sync::RwLock` 保证多线程安全访问。
//! Tauri 的 command 可能在不同线程上并发执行，RwLock 允许多个读操作并发进行。
//! 实践中配置修改都由顺序的用户操作触发，写冲突仅是理论场景。
//!
//! ## 锁与 await 的边界
//! 写锁只在同步闭包内持有；持久化前先克隆配置快照、释放锁，
//! 再对快照执行异步文件写入，避免跨 await 持锁。

use std::sync::RwLock;

use crate::models::settings::PluginConfig;
use crate::utils::error::ProcessError;
use crate::utils::path;

/// 应用全局配置状态
///
/// 通过 Tauri 的 `manage()` 方法注册为应用状态，
/// 所有 command 函数可以通过 `State<ConfigStore>` 参数访问。
pub struct ConfigStore {
    /// 内存中的当前配置，进程内唯一可信来源
    config: RwLock<PluginConfig>,
}

impl ConfigStore {
    /// 从磁盘加载配置并创建存储实例（应用启动时调用一次）
    ///
    /// 加载策略：
    /// - 配置文件不存在（首次使用）→ 默认配置
    /// - 读取或解析失败 → 记录警告日志，回落到默认配置
    pub fn load() -> Self {
        let config = Self::read_from_disk().unwrap_or_else(|e| {
            log::warn!("加载配置失败，使用默认配置: {}", e);
            PluginConfig::default()
        });
        Self {
            config: RwLock::new(config),
        }
    }

    /// 使用指定配置创建存储实例（测试用）
    #[cfg(test)]
    pub fn with_config(config: PluginConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }

    /// 同步读取并解析磁盘上的配置文件
    ///
    /// 启动阶段在 Tauri setup 之前执行，此处使用 `std::fs` 同步 I/O。
    fn read_from_disk() -> Result<PluginConfig, String> {
        let config_path = path::get_config_file_path()?;

        // 文件不存在时视为首次使用，返回默认配置
        if !config_path.exists() {
            return Ok(PluginConfig::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("读取配置文件失败: {}", e))?;

        serde_json::from_str(&content).map_err(|e| format!("解析配置文件失败: {}", e))
    }

    /// 获取当前配置的克隆快照
    ///
    /// # 错误
    /// 配置锁中毒（持锁线程 panic）时返回 `Storage` 错误。
    pub fn snapshot(&self) -> Result<PluginConfig, ProcessError> {
        self.config
            .read()
            .map(|c| c.clone())
            .map_err(|_| ProcessError::Storage("配置锁已损坏".to_string()))
    }

    /// 在写锁内修改配置，并返回修改结果和修改后的配置快照
    ///
    /// 快照用于在锁外执行异步持久化（见模块级说明）。
    ///
    /// # 参数
    /// - `mutate` - 修改闭包，可返回任意结果（如新建的提示词）
    ///
    /// # 返回值
    /// `(闭包结果, 修改后的配置快照)` 二元组
    pub fn update<R>(
        &self,
        mutate: impl FnOnce(&mut PluginConfig) -> R,
    ) -> Result<(R, PluginConfig), ProcessError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| ProcessError::Storage("配置锁已损坏".to_string()))?;
        let result = mutate(&mut config);
        Ok((result, config.clone()))
    }

    /// 在写锁内尝试修改配置，修改闭包失败时原样透传错误且不持久化
    ///
    /// 用于「校验 + 修改」必须原子完成的操作（如提示词导入的全有或全无语义）。
    pub fn try_update<R>(
        &self,
        mutate: impl FnOnce(&mut PluginConfig) -> Result<R, ProcessError>,
    ) -> Result<(R, PluginConfig), ProcessError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| ProcessError::Storage("配置锁已损坏".to_string()))?;
        let result = mutate(&mut config)?;
        Ok((result, config.clone()))
    }

    /// 将配置快照持久化到磁盘
    ///
    /// 序列化为带 2 空格缩进的 JSON（与前端 `JSON.stringify(config, null, 2)`
    /// 格式一致），如配置目录不存在会自动递归创建。
    ///
    /// # 参数
    /// - `config` - 要写入的配置快照
    ///
    /// # 错误
    /// 目录创建失败、序列化失败或文件写入失败时返回 `Storage` 错误。
    pub async fn persist(config: &PluginConfig) -> Result<(), ProcessError> {
        let config_dir = path::get_config_dir().map_err(ProcessError::Storage)?;

        // 确保配置目录存在，递归创建所有缺失的父目录
        if !config_dir.exists() {
            tokio::fs::create_dir_all(&config_dir)
                .await
                .map_err(|e| ProcessError::Storage(format!("创建配置目录失败: {}", e)))?;
        }

        let config_path = config_dir.join(path::CONFIG_FILE_NAME);
        let content = serde_json::to_string_pretty(config)
            .map_err(|e| ProcessError::Storage(format!("序列化配置失败: {}", e)))?;

        tokio::fs::write(&config_path, content)
            .await
            .map_err(|e| ProcessError::Storage(format!("写入配置文件失败: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_returns_result_and_snapshot() {
        let store = ConfigStore::with_config(PluginConfig::default());
        let (result, snapshot) = store
            .update(|c| {
                c.default_model_name = "qwen2.5".to_string();
                42
            })
            .expect("写锁应可用");
        assert_eq!(result, 42);
        assert_eq!(snapshot.default_model_name, "qwen2.5");

        // 内存态与快照一致
        let current = store.snapshot().expect("读锁应可用");
        assert_eq!(current.default_model_name, "qwen2.5");
    }

    #[test]
    fn test_try_update_propagates_failure() {
        let store = ConfigStore::with_config(PluginConfig::default());
        // 闭包遵循「先校验后修改」约定：校验失败直接返回错误，不触碰配置
        let err = store
            .try_update(|_c| -> Result<(), ProcessError> {
                Err(ProcessError::Validation("测试失败路径".to_string()))
            })
            .expect_err("闭包失败应透传错误");
        assert!(matches!(err, ProcessError::Validation(_)));

        // 配置保持原样，也没有产生待持久化的快照
        let current = store.snapshot().expect("读锁应可用");
        assert_eq!(current, PluginConfig::default());
    }
}

//! 记录编解码与尽力而为读取
//!
//! - 实体 JSON 存放在 `{prefix}:{id}` 的 `data` 字段
//! - 列表读取跳过缺失或无法解析的记录（记 warn），后端错误照常返回
//! - 成员集合无序，读取时按数值 ID 排序得到确定顺序

use crate::error::RepositoryError;
use fleet_storage::KvStore;
use fleet_storage::keys::{EntityKeys, RECORD_FIELD};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// ID 排序方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdOrder {
    Ascending,
    /// ID 单调分配，降序即最新在前。
    Descending,
}

pub(crate) async fn read_record<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, RepositoryError> {
    let Some(raw) = store.get(key, RECORD_FIELD).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|err| RepositoryError::Decode(format!("{key}: {err}")))
}

pub(crate) async fn write_record<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), RepositoryError> {
    let data =
        serde_json::to_string(value).map_err(|err| RepositoryError::Encode(err.to_string()))?;
    store.set(key, RECORD_FIELD, &data).await?;
    Ok(())
}

/// 按给定 ID 顺序读取记录，最多返回 `limit` 条成功解析的记录。
pub(crate) async fn read_many<T: DeserializeOwned>(
    store: &dyn KvStore,
    keys: EntityKeys,
    ids: impl IntoIterator<Item = i64>,
    limit: usize,
) -> Result<Vec<T>, RepositoryError> {
    let mut items = Vec::new();
    for id in ids {
        if items.len() >= limit {
            break;
        }
        let key = keys.record(id);
        match read_record(store, &key).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {
                warn!(target: "fleet.repository", key = %key, "record_missing_skipped");
            }
            Err(RepositoryError::Decode(reason)) => {
                warn!(target: "fleet.repository", key = %key, reason = %reason, "record_decode_skipped");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(items)
}

/// 解析索引中的 ID，跳过非数字成员。
pub(crate) fn parse_ids(index: &str, members: Vec<String>) -> Vec<i64> {
    members
        .into_iter()
        .filter_map(|member| match member.parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!(target: "fleet.repository", index = %index, member = %member, "index_member_skipped");
                None
            }
        })
        .collect()
}

/// 读取实体集合中的全部 ID 并排序。
pub(crate) async fn member_ids(
    store: &dyn KvStore,
    keys: EntityKeys,
    order: IdOrder,
) -> Result<Vec<i64>, RepositoryError> {
    let index = keys.all();
    let members = store.set_members(&index).await?;
    let mut ids = parse_ids(&index, members);
    match order {
        IdOrder::Ascending => ids.sort_unstable(),
        IdOrder::Descending => ids.sort_unstable_by(|a, b| b.cmp(a)),
    }
    Ok(ids)
}

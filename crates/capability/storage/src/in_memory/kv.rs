//! KV 内存存储实现
//!
//! Redis 不可达时的本地降级后端，也用于测试。
//!
//! 功能：
//! - 与 Redis 一致的记录 / 计数器 / 集合 / 列表语义
//! - 对类型不符的键返回 WRONGTYPE 错误
//! - 集合最后一个成员移除后删除该键

use crate::error::StorageError;
use crate::traits::KvStore;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
enum Entry {
    Hash(HashMap<String, String>),
    Counter(i64),
    Set(BTreeSet<String>),
    List(VecDeque<String>),
}

/// KV 内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryKvStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前键数量（用于测试）
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Entry>>, StorageError> {
        self.entries
            .read()
            .map_err(|_| StorageError::new("lock failed"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Entry>>, StorageError> {
        self.entries
            .write()
            .map_err(|_| StorageError::new("lock failed"))
    }
}

/// 将 Redis 风格的闭区间下标换算为切片区间。
fn range_bounds(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[async_trait::async_trait]
impl KvStore for InMemoryKvStore {
    async fn ping(&self) -> Result<(), StorageError> {
        self.read().map(|_| ())
    }

    async fn get(&self, key: &str, field: &str) -> Result<Option<String>, StorageError> {
        let map = self.read()?;
        match map.get(key) {
            None => Ok(None),
            Some(Entry::Hash(fields)) => Ok(fields.get(field).cloned()),
            Some(_) => Err(StorageError::wrong_type(key)),
        }
    }

    async fn set(&self, key: &str, field: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.write()?;
        let entry = map
            .entry(key.to_string())
            .or_insert_with(|| Entry::Hash(HashMap::new()));
        match entry {
            Entry::Hash(fields) => {
                fields.insert(field.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(StorageError::wrong_type(key)),
        }
    }

    async fn increment(&self, counter: &str) -> Result<i64, StorageError> {
        let mut map = self.write()?;
        let entry = map
            .entry(counter.to_string())
            .or_insert(Entry::Counter(0));
        match entry {
            Entry::Counter(value) => {
                *value = value
                    .checked_add(1)
                    .ok_or_else(|| StorageError::new("increment or decrement would overflow"))?;
                Ok(*value)
            }
            _ => Err(StorageError::wrong_type(counter)),
        }
    }

    async fn add_to_set(&self, set: &str, member: &str) -> Result<(), StorageError> {
        let mut map = self.write()?;
        let entry = map
            .entry(set.to_string())
            .or_insert_with(|| Entry::Set(BTreeSet::new()));
        match entry {
            Entry::Set(members) => {
                members.insert(member.to_string());
                Ok(())
            }
            _ => Err(StorageError::wrong_type(set)),
        }
    }

    async fn remove_from_set(&self, set: &str, member: &str) -> Result<(), StorageError> {
        let mut map = self.write()?;
        let now_empty = match map.get_mut(set) {
            None => return Ok(()),
            Some(Entry::Set(members)) => {
                members.remove(member);
                members.is_empty()
            }
            Some(_) => return Err(StorageError::wrong_type(set)),
        };
        if now_empty {
            map.remove(set);
        }
        Ok(())
    }

    async fn set_members(&self, set: &str) -> Result<Vec<String>, StorageError> {
        let map = self.read()?;
        match map.get(set) {
            None => Ok(Vec::new()),
            Some(Entry::Set(members)) => Ok(members.iter().cloned().collect()),
            Some(_) => Err(StorageError::wrong_type(set)),
        }
    }

    async fn set_cardinality(&self, set: &str) -> Result<u64, StorageError> {
        let map = self.read()?;
        match map.get(set) {
            None => Ok(0),
            Some(Entry::Set(members)) => Ok(members.len() as u64),
            Some(_) => Err(StorageError::wrong_type(set)),
        }
    }

    async fn list_push_front(&self, list: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.write()?;
        let entry = map
            .entry(list.to_string())
            .or_insert_with(|| Entry::List(VecDeque::new()));
        match entry {
            Entry::List(items) => {
                items.push_front(value.to_string());
                Ok(())
            }
            _ => Err(StorageError::wrong_type(list)),
        }
    }

    async fn list_range(
        &self,
        list: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, StorageError> {
        let map = self.read()?;
        let items = match map.get(list) {
            None => return Ok(Vec::new()),
            Some(Entry::List(items)) => items,
            Some(_) => return Err(StorageError::wrong_type(list)),
        };
        let Some((start, stop)) = range_bounds(items.len(), start, stop) else {
            return Ok(Vec::new());
        };
        Ok(items.range(start..=stop).cloned().collect())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.write()?.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.read()?.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::range_bounds;

    #[test]
    fn range_bounds_follow_redis_semantics() {
        assert_eq!(range_bounds(5, 0, -1), Some((0, 4)));
        assert_eq!(range_bounds(5, 0, 0), Some((0, 0)));
        assert_eq!(range_bounds(5, 1, 100), Some((1, 4)));
        assert_eq!(range_bounds(5, -2, -1), Some((3, 4)));
        assert_eq!(range_bounds(5, -100, 1), Some((0, 1)));
        assert_eq!(range_bounds(5, 3, 1), None);
        assert_eq!(range_bounds(5, 5, 10), None);
        assert_eq!(range_bounds(5, 0, -6), None);
        assert_eq!(range_bounds(0, 0, -1), None);
    }
}

pub mod customer;

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
};
use thiserror::Error;

pub trait Id:
    Copy
    + Eq
    + Deref<Target = Self::Inner>
    + From<Self::Inner>
    + Display
    + Debug
    + Serialize
    + for<'de> Deserialize<'de>
{
    type Inner: FromStr;
}

pub trait Entity: Debug + Clone {
    type Id: Id;

    const ENTITY_NAME: &'static str;

    fn id(&self) -> Self::Id;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataAccessError {
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: String },
}

impl DataAccessError {
    pub fn not_found<E: Entity>(id: E::Id) -> Self {
        Self::NotFound {
            entity: E::ENTITY_NAME,
            id: id.to_string(),
        }
    }
}

/// ID採番方式
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// これまでに採番した最大値 + 1。削除後も再利用しない
    #[default]
    Monotonic,
    /// 現在の件数 + 1。削除後は既存IDと衝突しうる
    CountBased,
}

#[derive(Clone, Debug)]
pub struct IdGenerator {
    policy: IdPolicy,
    last: i64,
}

impl IdGenerator {
    pub fn new(policy: IdPolicy) -> Self {
        Self { policy, last: 0 }
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// 既存のIDを通知し、以降の採番がそれを下回らないようにする
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }

    pub fn generate<T>(&mut self, count: usize) -> T
    where
        T: From<i64>,
    {
        let id = match self.policy {
            IdPolicy::Monotonic => self.last + 1,
            IdPolicy::CountBased => count as i64 + 1,
        };
        self.observe(id);
        T::from(id)
    }
}

impl From<IdPolicy> for IdGenerator {
    fn from(value: IdPolicy) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_never_reuses() {
        let mut gen = IdGenerator::new(IdPolicy::Monotonic);
        gen.observe(3);
        assert_eq!(gen.generate::<i64>(3), 4);
        // 件数が減っても採番は戻らない
        assert_eq!(gen.generate::<i64>(3), 5);
        assert_eq!(gen.generate::<i64>(0), 6);
    }

    #[test]
    fn test_count_based_follows_len() {
        let mut gen = IdGenerator::new(IdPolicy::CountBased);
        gen.observe(3);
        assert_eq!(gen.generate::<i64>(3), 4);
        assert_eq!(gen.generate::<i64>(3), 4);
        assert_eq!(gen.generate::<i64>(1), 2);
    }
}

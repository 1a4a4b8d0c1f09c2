use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::customer::{
    self, Customer, CustomerFields, CustomerId, CustomerRepository,
};
use crate::domain::{DataAccessError, Entity, IdGenerator, IdPolicy};

/// メモリ上の顧客リポジトリ。クローンは同じ顧客一覧を共有する
#[derive(Clone)]
pub struct InMemoryCustomerRepository {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    customers: Vec<Customer>,
    ids: IdGenerator,
}

impl Inner {
    fn position(&self, id: CustomerId) -> Option<usize> {
        self.customers.iter().position(|c| c.id() == id)
    }
}

impl InMemoryCustomerRepository {
    pub fn new(policy: IdPolicy) -> Self {
        Self::with_customers(policy, Vec::new())
    }

    pub fn with_customers(policy: IdPolicy, customers: Vec<Customer>) -> Self {
        let mut ids = IdGenerator::from(policy);
        for c in &customers {
            ids.observe(*c.id());
        }
        Self {
            inner: Arc::new(RwLock::new(Inner { customers, ids })),
        }
    }

    pub fn seeded(policy: IdPolicy) -> Self {
        Self::with_customers(policy, customer::seed())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_all(&self) -> Vec<Customer> {
        self.inner.read().await.customers.clone()
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Customer, DataAccessError> {
        self.inner
            .read()
            .await
            .customers
            .iter()
            .find(|c| c.id() == id)
            .cloned()
            .ok_or_else(|| DataAccessError::not_found::<Customer>(id))
    }

    async fn create(&self, fields: CustomerFields) -> Customer {
        let mut inner = self.inner.write().await;
        let count = inner.customers.len();
        let id: CustomerId = inner.ids.generate(count);
        let customer = Customer::create(id, fields);
        inner.customers.push(customer.clone());
        info!(%id, policy = ?inner.ids.policy(), "顧客を登録しました");
        customer
    }

    async fn update(
        &self,
        id: CustomerId,
        fields: CustomerFields,
    ) -> Result<Customer, DataAccessError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .position(id)
            .ok_or_else(|| DataAccessError::not_found::<Customer>(id))?;
        let customer = &mut inner.customers[index];
        customer.update(fields);
        debug!(%id, "顧客を更新しました");
        Ok(customer.clone())
    }

    async fn delete(&self, id: CustomerId) -> Result<(), DataAccessError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .position(id)
            .ok_or_else(|| DataAccessError::not_found::<Customer>(id))?;
        inner.customers.remove(index);
        info!(%id, "顧客を削除しました");
        Ok(())
    }
}

use async_trait::async_trait;
use derive_more::{Deref, Display, Error, From};
use serde::{Deserialize, Serialize};

use crate::domain::{DataAccessError, Entity, Id};

/// 顧客リポジトリ
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// 全顧客を登録順で取得する
    async fn find_all(&self) -> Vec<Customer>;
    /// 顧客をIDで検索する
    async fn find_by_id(&self, id: CustomerId) -> Result<Customer, DataAccessError>;
    /// 顧客を新規登録する
    async fn create(&self, fields: CustomerFields) -> Customer;
    /// 顧客を更新する
    async fn update(
        &self,
        id: CustomerId,
        fields: CustomerFields,
    ) -> Result<Customer, DataAccessError>;
    /// 顧客を削除する
    async fn delete(&self, id: CustomerId) -> Result<(), DataAccessError>;
}

/// 顧客ID
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Deref, Default,
)]
pub struct CustomerId(i64);

impl Id for CustomerId {
    type Inner = i64;
}

/// 顧客エンティティ
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    role: String,
    email: String,
    phone: String,
    contacted: bool,
}

impl Customer {
    pub fn create(id: CustomerId, fields: CustomerFields) -> Self {
        Self {
            id,
            name: fields.name,
            role: fields.role,
            email: fields.email,
            phone: fields.phone,
            contacted: fields.contacted.unwrap_or(false),
        }
    }

    /// IDを除く全項目を上書きする。`contacted` が未指定なら現在値を維持する
    pub fn update(&mut self, fields: CustomerFields) {
        self.name = fields.name;
        self.role = fields.role;
        self.email = fields.email;
        self.phone = fields.phone;
        if let Some(contacted) = fields.contacted {
            self.contacted = contacted;
        }
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn role(&self) -> &String {
        &self.role
    }

    pub fn email(&self) -> &String {
        &self.email
    }

    pub fn phone(&self) -> &String {
        &self.phone
    }

    pub fn contacted(&self) -> bool {
        self.contacted
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    const ENTITY_NAME: &'static str = "customer";

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// 起動時に登録される初期顧客
pub fn seed() -> Vec<Customer> {
    [
        (1, "John Doe", "CEO", "john.doe@example.com"),
        (2, "Jane Doe", "CTO", "jane.doe@example.com"),
        (3, "John Smith", "CFO", "jon.smith@example.com"),
    ]
    .into_iter()
    .map(|(id, name, role, email)| Customer {
        id: CustomerId(id),
        name: name.to_owned(),
        role: role.to_owned(),
        email: email.to_owned(),
        phone: "1234567890".to_owned(),
        contacted: false,
    })
    .collect()
}

/// リクエストボディ。必須チェック前なので全項目が任意
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerPayload {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contacted: Option<bool>,
}

impl CustomerPayload {
    pub fn validate(self) -> Result<CustomerFields, CustomerError> {
        Ok(CustomerFields {
            name: Self::required(self.name, CustomerError::NameIsBlank)?,
            role: Self::required(self.role, CustomerError::RoleIsBlank)?,
            email: Self::required(self.email, CustomerError::EmailIsBlank)?,
            phone: Self::required(self.phone, CustomerError::PhoneIsBlank)?,
            contacted: self.contacted,
        })
    }

    fn required(value: Option<String>, error: CustomerError) -> Result<String, CustomerError> {
        match value {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(error),
        }
    }
}

/// 必須チェック済みの顧客項目
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerFields {
    name: String,
    role: String,
    email: String,
    phone: String,
    contacted: Option<bool>,
}

/// 顧客エラー
#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// 名前が空欄です
    #[display(fmt = "Name is required")]
    NameIsBlank,
    /// 役職が空欄です
    #[display(fmt = "Role is required")]
    RoleIsBlank,
    /// メールアドレスが空欄です
    #[display(fmt = "Email is required")]
    EmailIsBlank,
    /// 電話番号が空欄です
    #[display(fmt = "Phone is required")]
    PhoneIsBlank,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload() -> CustomerPayload {
        CustomerPayload {
            name: Some("X".to_owned()),
            role: Some("Eng".to_owned()),
            email: Some("x@x.com".to_owned()),
            phone: Some("000".to_owned()),
            contacted: None,
        }
    }

    #[test]
    fn test_customer_create() {
        let customer = Customer::create(CustomerId(4), payload().validate().unwrap());
        assert_eq!(customer.id(), CustomerId(4));
        assert_eq!(customer.name(), "X");
        assert_eq!(customer.role(), "Eng");
        assert_eq!(customer.email(), "x@x.com");
        assert_eq!(customer.phone(), "000");
        assert!(!customer.contacted());
    }

    #[test]
    fn test_customer_update_keeps_id() {
        let mut customer = seed().remove(0);
        let fields = CustomerPayload {
            contacted: Some(true),
            ..payload()
        };
        customer.update(fields.validate().unwrap());
        assert_eq!(customer.id(), CustomerId(1));
        assert_eq!(customer.name(), "X");
        assert!(customer.contacted());

        // contacted 未指定なら現在値を維持
        customer.update(payload().validate().unwrap());
        assert!(customer.contacted());
    }

    #[test]
    fn test_validate_checks_presence_only() {
        let missing = CustomerPayload {
            role: None,
            ..payload()
        };
        assert_eq!(missing.validate(), Err(CustomerError::RoleIsBlank));

        let empty = CustomerPayload {
            phone: Some(String::new()),
            ..payload()
        };
        assert_eq!(empty.validate(), Err(CustomerError::PhoneIsBlank));

        // 空白のみは空文字ではないので受け付ける
        let spaces = CustomerPayload {
            name: Some(" ".to_owned()),
            ..payload()
        };
        assert_eq!(spaces.validate().map(|f| f.name), Ok(" ".to_owned()));
        assert_eq!(CustomerError::PhoneIsBlank.to_string(), "Phone is required");
    }

    #[test]
    fn test_payload_ignores_id() {
        let payload: CustomerPayload = serde_json::from_value(json!({
            "id": 99,
            "name": "X",
            "role": "Eng",
            "email": "x@x.com",
            "phone": "000",
        }))
        .unwrap();
        assert_eq!(payload, self::payload());
    }

    #[test]
    fn test_customer_json_shape() {
        let customer = seed().remove(1);
        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            json!({
                "id": 2,
                "name": "Jane Doe",
                "role": "CTO",
                "email": "jane.doe@example.com",
                "phone": "1234567890",
                "contacted": false,
            })
        );
    }

    #[test]
    fn test_seed_ids() {
        let ids = seed().iter().map(|c| *c.id()).collect::<Vec<_>>();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_not_found_message() {
        let error = DataAccessError::not_found::<Customer>(CustomerId(7));
        assert_eq!(error.to_string(), "customer with ID 7 not found");
    }
}

/*
 * Responsibility
 * - Handler から見える「認証済み主体」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token の検証ロジックは middleware/services 側の責務
 * - ここは「型（契約）」として固定化する
 */

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Coarse-grained role category. Decides which token transport a principal's
/// credential travels on (header for Admin, cookie for User) and which
/// middleware instance will accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoleClass {
    Admin,
    User,
}

impl RoleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleClass::Admin => "ADMIN",
            RoleClass::User => "USER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(RoleClass::Admin),
            "USER" => Some(RoleClass::User),
            _ => None,
        }
    }
}

/// 認証済みのリクエストに付与される principal
///
/// - `id` は安定キー（割り当て後は不変）
/// - `attributes` は表示用の opaque な属性（pipeline はこの中身を解釈しない）
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: String,
    pub role: RoleClass,
    pub attributes: HashMap<String, String>,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: RoleClass) -> Self {
        Self {
            id: id.into(),
            role,
            attributes: HashMap::new(),
        }
    }
}

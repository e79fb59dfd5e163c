//! Shared primitive types used across the entire dashboard core.
//!
//! RULE: categories are closed enums. Grouping iterates `ALL` so a
//! category with zero clients is still reported.

use crate::error::{BoardError, BoardResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stable, unique client identifier (`CLI000001`).
pub type ClientId = String;

/// All timestamps in the core are UTC instants.
pub type Timestamp = DateTime<Utc>;

// ── Categories ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Premium,
    Standard,
    #[serde(alias = "Básico", alias = "Basico")]
    Basic,
}

impl Segment {
    /// Fixed reporting order.
    pub const ALL: [Segment; 3] = [Segment::Premium, Segment::Standard, Segment::Basic];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Premium => "Premium",
            Self::Standard => "Standard",
            Self::Basic => "Basic",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Norte,
    Nordeste,
    #[serde(rename = "Centro-Oeste", alias = "CentroOeste")]
    CentroOeste,
    Sudeste,
    Sul,
}

impl Region {
    /// Fixed reporting order.
    pub const ALL: [Region; 5] = [
        Region::Norte,
        Region::Nordeste,
        Region::CentroOeste,
        Region::Sudeste,
        Region::Sul,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Norte => "Norte",
            Self::Nordeste => "Nordeste",
            Self::CentroOeste => "Centro-Oeste",
            Self::Sudeste => "Sudeste",
            Self::Sul => "Sul",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ClientStatus {
    #[serde(alias = "Ativo")]
    Active,
    #[serde(alias = "Inativo")]
    Inactive,
    #[serde(alias = "Pendente")]
    Pending,
}

impl ClientStatus {
    pub const ALL: [ClientStatus; 3] = [
        ClientStatus::Active,
        ClientStatus::Inactive,
        ClientStatus::Pending,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase, strip accents and separators so `"Centro-Oeste"`,
/// `"centro oeste"` and `"centrooeste"` compare equal.
fn normalize_key(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'Ú' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Returned when text does not name any known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Segment {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "premium" => Ok(Self::Premium),
            "standard" => Ok(Self::Standard),
            "basic" | "basico" => Ok(Self::Basic),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl FromStr for Region {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Region::ALL
            .into_iter()
            .find(|r| normalize_key(r.name()) == key)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl FromStr for ClientStatus {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "active" | "ativo" => Ok(Self::Active),
            "inactive" | "inativo" => Ok(Self::Inactive),
            "pending" | "pendente" => Ok(Self::Pending),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

// ── Records ────────────────────────────────────────────────────

/// Relative slack allowed between a stored purchase total and
/// `quantity * unit_price` (JSON float round-trips are not exact).
const PURCHASE_TOTAL_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purchase {
    pub date: Timestamp,
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

impl Purchase {
    pub fn new(date: Timestamp, product: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            date,
            product: product.into(),
            quantity,
            unit_price,
            total: unit_price * quantity as f64,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub city: String,
    pub segment: Segment,
    pub region: Region,
    pub status: ClientStatus,
    pub registration_date: Timestamp,
    #[serde(default)]
    pub last_purchase_date: Option<Timestamp>,
    /// Lifetime spend to date.
    pub total_spent: f64,
    pub total_purchases: u32,
    /// Purchases per month.
    #[serde(default)]
    pub purchase_frequency: f64,
    pub churn_risk: f64,
    pub satisfaction: u8,
    #[serde(default)]
    pub purchases: Vec<Purchase>,
}

impl Client {
    /// A bare client with no purchases. Display fields are left empty.
    pub fn new(
        id: impl Into<ClientId>,
        segment: Segment,
        region: Region,
        status: ClientStatus,
        registration_date: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            city: String::new(),
            segment,
            region,
            status,
            registration_date,
            last_purchase_date: None,
            total_spent: 0.0,
            total_purchases: 0,
            purchase_frequency: 0.0,
            churn_risk: 0.0,
            satisfaction: 3,
            purchases: Vec::new(),
        }
    }

    /// Append a purchase and keep the stored totals consistent with it.
    /// Purchases may arrive out of order; the latest date wins.
    pub fn record_purchase(&mut self, purchase: Purchase) {
        self.total_spent += purchase.total;
        self.total_purchases += 1;
        self.last_purchase_date = Some(match self.last_purchase_date {
            Some(last) => last.max(purchase.date),
            None => purchase.date,
        });
        self.purchases.push(purchase);
    }

    /// Check the record invariants a loaded book must hold.
    pub fn validate(&self) -> BoardResult<()> {
        let invalid = |reason: String| BoardError::InvalidClient {
            id: self.id.clone(),
            reason,
        };
        if !(1..=5).contains(&self.satisfaction) {
            return Err(invalid(format!("satisfaction {} outside 1..=5", self.satisfaction)));
        }
        if !(0.0..=1.0).contains(&self.churn_risk) {
            return Err(invalid(format!("churn_risk {} outside [0, 1]", self.churn_risk)));
        }
        if !self.total_spent.is_finite() || self.total_spent < 0.0 {
            return Err(invalid(format!("total_spent {} is negative", self.total_spent)));
        }
        if !self.purchase_frequency.is_finite() || self.purchase_frequency < 0.0 {
            return Err(invalid(format!(
                "purchase_frequency {} is negative",
                self.purchase_frequency
            )));
        }
        for (n, p) in self.purchases.iter().enumerate() {
            if p.quantity == 0 {
                return Err(invalid(format!("purchase {n}: quantity is 0")));
            }
            if !p.unit_price.is_finite() || p.unit_price <= 0.0 {
                return Err(invalid(format!("purchase {n}: unit_price {} not positive", p.unit_price)));
            }
            let expected = p.unit_price * p.quantity as f64;
            if (p.total - expected).abs() > PURCHASE_TOTAL_TOLERANCE * expected.max(1.0) {
                return Err(invalid(format!(
                    "purchase {n}: total {} != {} x {}",
                    p.total, p.quantity, p.unit_price
                )));
            }
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }

    pub fn is_at_risk(&self) -> bool {
        self.churn_risk > crate::metrics::CHURN_RISK_THRESHOLD
    }
}

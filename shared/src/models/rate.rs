//! Rate Plan and Rate Rule Models
//!
//! Prices are computed by the backend; the client only edits the rules.

use serde::{Deserialize, Serialize};

/// Rate plan entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatePlan {
    pub id: i64,
    pub property_id: i64,
    pub name: String,
    pub currency: String,
}

/// Create rate plan payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatePlanCreate {
    pub name: String,
    pub currency: String,
}

/// Update rate plan payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatePlanUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateRuleStatus {
    Active,
    Inactive,
}

/// Rate rule entity (date window + weekday/weekend pricing for one room type)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRule {
    pub id: i64,
    pub rate_plan_id: i64,
    pub room_type_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub weekday_price: f64,
    pub weekend_price: f64,
    #[serde(default)]
    pub extra_adult_price: f64,
    #[serde(default)]
    pub extra_child_price: f64,
    #[serde(default)]
    pub min_nights: i32,
    #[serde(default)]
    pub priority: i32,
    pub status: RateRuleStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Create rate rule payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRuleCreate {
    pub room_type_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub weekday_price: f64,
    pub weekend_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_adult_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_child_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_nights: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RateRuleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update rate rule payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRuleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_adult_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_child_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_nights: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RateRuleStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

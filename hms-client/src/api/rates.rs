//! Rate plan, rate rule and pricing config endpoints

use shared::ApiResponse;
use shared::models::{
    PricingConfig, PricingConfigUpdate, RatePlan, RatePlanCreate, RatePlanUpdate, RateRule,
    RateRuleCreate, RateRuleUpdate,
};

use super::Empty;
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct RatePlansApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> RatePlansApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, property_id: i64) -> ClientResult<ApiResponse<Vec<RatePlan>>> {
        self.client
            .get(&format!("/properties/{property_id}/rate-plans"))
            .await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<RatePlan>> {
        self.client.get(&format!("/properties/rate-plans/{id}")).await
    }

    pub async fn create(&self, property_id: i64, data: &RatePlanCreate) -> ClientResult<ApiResponse<RatePlan>> {
        self.client
            .post(&format!("/properties/{property_id}/rate-plans"), data)
            .await
    }

    pub async fn update(&self, id: i64, data: &RatePlanUpdate) -> ClientResult<ApiResponse<RatePlan>> {
        self.client
            .patch(&format!("/properties/rate-plans/{id}"), data)
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/properties/rate-plans/{id}")).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateRulesApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> RateRulesApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, rate_plan_id: i64) -> ClientResult<ApiResponse<Vec<RateRule>>> {
        self.client.get(&format!("/rate-plans/{rate_plan_id}/rules")).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<RateRule>> {
        self.client.get(&format!("/rate-plans/rules/{id}")).await
    }

    pub async fn create(&self, rate_plan_id: i64, data: &RateRuleCreate) -> ClientResult<ApiResponse<RateRule>> {
        self.client
            .post(&format!("/rate-plans/{rate_plan_id}/rules"), data)
            .await
    }

    pub async fn update(&self, id: i64, data: &RateRuleUpdate) -> ClientResult<ApiResponse<RateRule>> {
        self.client.patch(&format!("/rate-plans/rules/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/rate-plans/rules/{id}")).await
    }
}

/// Weekend-day pricing switch of a property
#[derive(Debug, Clone, Copy)]
pub struct PricingConfigApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> PricingConfigApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn get(&self, property_id: i64) -> ClientResult<ApiResponse<PricingConfig>> {
        self.client
            .get(&format!("/properties/{property_id}/pricing-config"))
            .await
    }

    /// Replaces the whole config (`PUT`)
    pub async fn update(
        &self,
        property_id: i64,
        data: &PricingConfigUpdate,
    ) -> ClientResult<ApiResponse<PricingConfig>> {
        self.client
            .put(&format!("/properties/{property_id}/pricing-config"), data)
            .await
    }
}

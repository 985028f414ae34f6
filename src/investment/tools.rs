use async_trait::async_trait;
use serde_json::{Value, json};

use super::cost_comparison::{cost_comparison, no_properties_found};
use super::details::property_details;
use super::filter::filter_investment_options;
use super::models::{INVESTMENT_OPTIONS, InvestmentOptions};
use crate::tools::{SchemaFlattener, ToolDescriptor, TypedTool};

pub const FILTER_TOOL: &str = "filter_investment_options";
pub const COST_COMPARISON_TOOL: &str = "cost_comparison";
pub const PROPERTY_DETAILS_TOOL: &str = "property_details_and_insights";

#[derive(Debug)]
pub struct FilterInvestmentOptionsTool;

#[async_trait]
impl TypedTool for FilterInvestmentOptionsTool {
    type Params = InvestmentOptions;

    async fn run(&self, params: InvestmentOptions) -> anyhow::Result<Value> {
        let filtered = filter_investment_options(&params)?;
        if filtered.is_empty() {
            return Ok(no_properties_found());
        }
        Ok(json!({ "properties": filtered }))
    }
}

#[derive(Debug)]
pub struct CostComparisonTool;

#[async_trait]
impl TypedTool for CostComparisonTool {
    type Params = InvestmentOptions;

    async fn run(&self, params: InvestmentOptions) -> anyhow::Result<Value> {
        let filtered = filter_investment_options(&params)?;
        Ok(cost_comparison(&filtered)?)
    }
}

#[derive(Debug)]
pub struct PropertyDetailsTool;

#[async_trait]
impl TypedTool for PropertyDetailsTool {
    type Params = InvestmentOptions;

    async fn run(&self, params: InvestmentOptions) -> anyhow::Result<Value> {
        let filtered = filter_investment_options(&params)?;
        Ok(property_details(&filtered))
    }
}

/// The investment tools in catalogue order.
pub fn default_tools(flattener: &SchemaFlattener) -> Vec<ToolDescriptor> {
    let schema = flattener.object_schema(&INVESTMENT_OPTIONS);

    vec![
        ToolDescriptor::typed(
            FILTER_TOOL,
            "Filter the supplied property listings by budget, size, bedrooms, bathrooms \
             and property type, optionally sorted by a listing field.",
            schema.clone(),
            FilterInvestmentOptionsTool,
        )
        .with_post_call_prompt(
            "Summarize the matching properties for the user, highlighting price and size.",
        ),
        ToolDescriptor::typed(
            COST_COMPARISON_TOOL,
            "Compare total ownership costs (price, fees, price per square meter) of the \
             properties that match the investment criteria.",
            schema.clone(),
            CostComparisonTool,
        )
        .with_pre_call_prompt("Collecting the properties that match your budget.")
        .with_post_call_prompt(
            "Present the comparison as a table and point out the best value per square meter.",
        ),
        ToolDescriptor::typed(
            PROPERTY_DETAILS_TOOL,
            "Show detailed information and insights (areas, payment plan, media, virtual \
             tours) for the properties that match the investment criteria.",
            schema,
            PropertyDetailsTool,
        )
        .with_rerun(true, false),
    ]
}

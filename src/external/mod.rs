pub mod ads_provider;
pub mod anthropic;
pub mod linkedin;
pub mod report_provider;

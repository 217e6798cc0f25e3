pub(crate) mod accounts;
pub(crate) mod ads;
pub(crate) mod analytics;
pub(crate) mod campaign_groups;
pub(crate) mod campaigns;
pub(crate) mod health;
pub(crate) mod report;

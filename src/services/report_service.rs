use std::fmt::Write;

use tracing::info;

use crate::errors::AppError;
use crate::external::report_provider::ReportProvider;
use crate::models::{MetricSet, ReportRequest, ReportResponse};

pub async fn generate_report(
    provider: &dyn ReportProvider,
    request: ReportRequest,
) -> Result<ReportResponse, AppError> {
    let prompt = build_report_prompt(&request);
    info!("Generating optimisation report ({} chars of prompt)", prompt.len());

    let report = provider.generate(prompt).await?;
    Ok(ReportResponse { report })
}

fn pct_change(current: f64, previous: f64) -> String {
    if previous > 0.0 {
        format!("{:.1}%", (current - previous) / previous * 100.0)
    } else {
        "N/A".to_string()
    }
}

fn period_section(out: &mut String, title: &str, m: &MetricSet) {
    let _ = write!(
        out,
        "### {title}\n\
         - Impressions: {}\n\
         - Clicks: {}\n\
         - CTR: {:.2}%\n\
         - Spend: {:.2}\n\
         - CPM: {:.2}\n\
         - CPC: {:.2}\n\
         - Leads: {}\n\
         - CPL: {:.2}\n\
         - Engagement Rate: {:.2}%\n\
         - Engagements: {}\n\n",
        m.impressions,
        m.clicks,
        m.ctr,
        m.spent,
        m.cpm,
        m.cpc,
        m.leads,
        m.cpl,
        m.engagement_rate,
        m.engagements,
    );
}

/// Builds the structured prompt the generation provider consumes. The
/// pipeline's only obligation here is supplying well-formed numbers; parsing
/// whatever comes back is the caller's problem.
pub fn build_report_prompt(req: &ReportRequest) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "You are a LinkedIn Ads expert and performance marketing consultant. \
         Analyze the following LinkedIn campaign data and provide a detailed report \
         with actionable optimisation recommendations.\n\n\
         ## Campaign Data\n\n\
         **Reporting Period:** {} to {}\n\
         **Compare Period:** {} to {}\n\
         **Selected Campaigns:** {}\n\n",
        req.current_range.start,
        req.current_range.end,
        req.previous_range.start,
        req.previous_range.end,
        if req.selected_campaigns.is_empty() {
            "All campaigns".to_string()
        } else {
            req.selected_campaigns.join(", ")
        },
    );

    period_section(&mut out, "Current Period Performance", &req.current);
    period_section(&mut out, "Previous Period Performance", &req.previous);

    let cur = &req.current;
    let prev = &req.previous;
    let _ = write!(
        out,
        "### Period-over-Period Changes\n\
         - Impressions: {}\n\
         - Clicks: {}\n\
         - CTR: {}\n\
         - Spend: {}\n\
         - CPL: {}\n\n",
        pct_change(cur.impressions as f64, prev.impressions as f64),
        pct_change(cur.clicks as f64, prev.clicks as f64),
        pct_change(cur.ctr, prev.ctr),
        pct_change(cur.spent, prev.spent),
        pct_change(cur.cpl, prev.cpl),
    );

    out.push_str("### Top Performing Campaigns\n");
    if req.top_performers.is_empty() {
        out.push_str("No data\n");
    } else {
        for ad in &req.top_performers {
            let _ = writeln!(
                out,
                "- Campaign ID {}: {} impressions, {} clicks, {:.2}% CTR, {:.2} spent",
                ad.id, ad.impressions, ad.clicks, ad.ctr, ad.spent
            );
        }
    }

    let (spent, elapsed, total) = req
        .budget_pacing
        .as_ref()
        .map(|p| (p.spent, p.days_elapsed, p.days_total))
        .unwrap_or((0.0, 0, 0));
    let _ = write!(
        out,
        "\n### Budget & Pacing\n\
         - Total Spend: {spent:.2}\n\
         - Days Elapsed: {elapsed} of {total} days\n\n"
    );

    out.push_str(
        "Please provide your response in the following structure:\n\n\
         ## Executive Summary\n\
         A 2-3 sentence overview of campaign performance.\n\n\
         ## Performance Analysis\n\
         Analyze each key metric (CTR, CPM, CPC, CPL, Engagement Rate) and what the trends mean.\n\n\
         ## What's Working Well\n\
         List 3-5 specific positive findings with brief explanations.\n\n\
         ## Areas of Concern\n\
         List 3-5 specific issues or underperformance areas with brief explanations.\n\n\
         ## Optimisation Recommendations\n\
         Provide 5-8 specific, actionable recommendations. For each:\n\
         - **Recommendation title**\n\
         - What to do (specific action)\n\
         - Why (data-backed reasoning)\n\
         - Expected impact\n\n\
         ## Budget Recommendations\n\
         Specific advice on budget allocation and pacing based on the data.\n\n\
         ## Next Steps\n\
         A prioritized list of the top 3 actions to take immediately.\n\n\
         Be specific, data-driven, and practical. Reference actual numbers from the data provided.",
    );

    out
}

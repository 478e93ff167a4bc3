use std::fmt::Write as _;

use chrono::NaiveDate;

use super::domain::BusinessDetail;

/// Render one business record to a printable HTML document. Sections the
/// backend has not stored are omitted, as are items with empty values, so
/// the printout only carries answered questions.
pub fn render_business_report(detail: &BusinessDetail, generated_on: NaiveDate) -> String {
    let title = if detail.business_name.trim().is_empty() {
        "Unnamed Business"
    } else {
        detail.business_name.as_str()
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    writeln!(
        html,
        "<title>Business Information - {}</title>",
        escape_html(title)
    )
    .expect("write title");
    html.push_str("</head>\n<body>\n");

    writeln!(html, "<h1>{}</h1>", escape_html(title)).expect("write heading");
    writeln!(
        html,
        "<p>Business Information Report — generated {}</p>",
        generated_on.format("%B %d, %Y")
    )
    .expect("write report line");

    render_section(
        &mut html,
        "Business Information",
        &[
            ("Business Name", Some(detail.business_name.clone())),
            ("Location", detail.location.clone()),
            ("ZIP Code", detail.zip_code.clone()),
            ("Phone Number", detail.phone_number.clone()),
            ("Email", detail.email.clone()),
            ("Website", detail.website.clone()),
            ("Contact Name", detail.contact_name.clone()),
            ("Contact Number", detail.contact_number.clone()),
        ],
    );

    if let Some(social) = &detail.social_media_info {
        render_section(
            &mut html,
            "Social Media Information",
            &[
                ("Social Accounts Exist", social.social_accounts_exist.clone()),
                ("Selected Platforms", joined(&social.selected_platforms)),
                ("Other Platform", social.other_platform.clone()),
                ("Setup/Redesign", social.setup_redesign.clone()),
                ("Setup Details", social.setup_details.clone()),
            ],
        );
    }

    if let Some(goals) = &detail.goals_info {
        render_section(
            &mut html,
            "Goals & Objectives",
            &[
                ("Selected Goals", joined(&goals.selected_goals)),
                ("Other Goal Details", goals.other_goal_details.clone()),
            ],
        );
    }

    if let Some(target) = &detail.target_info {
        render_section(
            &mut html,
            "Target Audience Information",
            &[
                ("Selected Ages", joined(&target.selected_ages)),
                ("Selected Genders", joined(&target.selected_genders)),
                ("Target Location", target.target_location.clone()),
                ("Target Interests", target.target_interests.clone()),
                ("Target Profession", target.target_profession.clone()),
                ("Other Details", target.target_other_details.clone()),
                ("Industries", target.target_industries.clone()),
                ("Pain Points", target.target_pain_points.clone()),
            ],
        );
    }

    if let Some(brand) = &detail.brand_voice {
        render_section(
            &mut html,
            "Brand Voice",
            &[
                ("Selected Voices", joined(&brand.selected_voices)),
                ("Other Voice", brand.other_voice.clone()),
                ("Brand Phrases", brand.brand_phrases.clone()),
                ("Brand Exclusions", brand.brand_exclusions.clone()),
            ],
        );
    }

    if let Some(content) = &detail.content_preferences {
        render_section(
            &mut html,
            "Content Preferences",
            &[
                (
                    "Selected Content Types",
                    joined(&content.selected_content_types),
                ),
                ("Other Content Type", content.other_content_type.clone()),
            ],
        );
    }

    if let Some(workflow) = &detail.workflow_info {
        render_section(
            &mut html,
            "Workflow Information",
            &[
                ("Reviewer Name", workflow.reviewer_name.clone()),
                ("Reviewer Location", workflow.reviewer_location.clone()),
                ("Reviewer Phone", workflow.reviewer_phone.clone()),
                ("Country Code", workflow.country_code.clone()),
                (
                    "Preferred Contact Modes",
                    joined(&workflow.preferred_contact_modes),
                ),
                ("Other Contact Method", workflow.other_contact_method.clone()),
                ("Report Frequency", workflow.report_frequency.clone()),
            ],
        );
    }

    if let Some(marketing) = &detail.marketing_info {
        render_section(
            &mut html,
            "Marketing Budget & Expectations",
            &[
                ("Budget", marketing.budget.clone()),
                ("Selected KPIs", joined(&marketing.selected_kpis)),
                ("Other KPI", marketing.other_kpi.clone()),
                ("Expected Results", marketing.expected_results.clone()),
            ],
        );
    }

    if let Some(additional) = &detail.additional_info {
        render_section(
            &mut html,
            "Additional Information",
            &[
                ("Admire Accounts", additional.admire_accounts.clone()),
                ("Competitors", additional.competitors.clone()),
                ("Upcoming Launches", additional.upcoming_launches.clone()),
                ("Other Information", additional.other_info.clone()),
            ],
        );
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_section(html: &mut String, title: &str, items: &[(&str, Option<String>)]) {
    let present: Vec<_> = items
        .iter()
        .filter_map(|(label, value)| match value {
            Some(value) if !value.trim().is_empty() => Some((*label, value.clone())),
            _ => None,
        })
        .collect();
    if present.is_empty() {
        return;
    }

    writeln!(html, "<h2>{}</h2>", escape_html(title)).expect("write section title");
    html.push_str("<dl>\n");
    for (label, value) in present {
        writeln!(
            html,
            "<dt>{}</dt><dd>{}</dd>",
            escape_html(label),
            escape_html(&value)
        )
        .expect("write item");
    }
    html.push_str("</dl>\n");
}

fn joined(values: &[String]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(values.join(", "))
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::admin::domain::{BusinessId, SocialMediaInfo};

    fn sample_detail() -> BusinessDetail {
        BusinessDetail {
            id: BusinessId("7".to_string()),
            business_name: "Acme <Studio>".to_string(),
            location: Some("Kathmandu".to_string()),
            website: Some(String::new()),
            social_media_info: Some(SocialMediaInfo {
                social_accounts_exist: Some("yes".to_string()),
                selected_platforms: vec!["Facebook".to_string(), "Instagram".to_string()],
                ..SocialMediaInfo::default()
            }),
            ..BusinessDetail::default()
        }
    }

    fn generated_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
    }

    #[test]
    fn report_escapes_interpolated_text() {
        let html = render_business_report(&sample_detail(), generated_on());
        assert!(html.contains("Acme &lt;Studio&gt;"));
        assert!(!html.contains("<Studio>"));
    }

    #[test]
    fn report_skips_empty_items_and_absent_sections() {
        let html = render_business_report(&sample_detail(), generated_on());
        assert!(!html.contains("Website"));
        assert!(!html.contains("Target Audience Information"));
        assert!(html.contains("Facebook, Instagram"));
    }

    #[test]
    fn unnamed_businesses_get_a_placeholder_title() {
        let mut detail = sample_detail();
        detail.business_name = "  ".to_string();
        let html = render_business_report(&detail, generated_on());
        assert!(html.contains("<h1>Unnamed Business</h1>"));
    }
}

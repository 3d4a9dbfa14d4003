use super::components::{card, CardStyle};
use super::escape_html;
use crate::catalog::{self, LearningAreaInfo};
use crate::models::User;

const SKILL_PREVIEW: usize = 3;

pub fn render(user: Option<&User>) -> String {
    let banner = user
        .map(|user| {
            let area = user.selected_area;
            format!(
                r#"<div class="welcome-banner"><p>Welcome back, {}! Continue your {area} journey <a href="/learning/{area}" aria-label="Continue">&#x2192;</a></p></div>"#,
                escape_html(&user.name)
            )
        })
        .unwrap_or_default();

    let cards: String = catalog::all().iter().map(area_card).collect();

    format!(
        r#"<section class="section muted"><div class="container"><div class="section-head"><h1>Choose Your Learning Path</h1><p>Select the technology area you want to master. Each path includes hands-on projects, real-world scenarios, and industry best practices.</p></div>{banner}<div class="grid grid-3">{cards}</div></div></section>"#
    )
}

fn area_card(area: &LearningAreaInfo) -> String {
    let mut skills: String = area
        .skills
        .iter()
        .take(SKILL_PREVIEW)
        .map(|skill| format!(r#"<span class="chip">{}</span>"#, escape_html(skill)))
        .collect();
    if area.skills.len() > SKILL_PREVIEW {
        skills.push_str(&format!(
            r#"<span class="chip-more">+{} more</span>"#,
            area.skills.len() - SKILL_PREVIEW
        ));
    }

    let body = format!(
        r#"<div class="card-stripe bg-{color}"></div><div class="card-top"><span class="area-icon">{icon}</span><span class="arrow">&#x2192;</span></div><h3>{title}</h3><p class="clamp">{description}</p><div class="meta"><span>&#x1F4D6; {modules} modules</span><span>&#x23F1; {hours} hours</span></div><div class="skills"><p>You&#39;ll learn:</p><div class="chips">{skills}</div></div>"#,
        color = area.color,
        icon = area.icon,
        title = escape_html(area.title),
        description = escape_html(area.description),
        modules = area.module_count,
        hours = area.estimated_hours,
    );

    format!(
        r#"<a class="card-link" href="/learning/{}">{}</a>"#,
        area.id,
        card(
            CardStyle {
                hover: true,
                ..Default::default()
            },
            "area-card",
            &body
        )
    )
}

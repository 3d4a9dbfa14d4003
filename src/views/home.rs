use super::components::{card, Button, CardStyle, Shadow, Size, Variant};
use super::escape_html;
use crate::catalog;

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "&lt;/&gt;",
        "Interactive Learning",
        "Learn by doing with hands-on exercises and real-world projects",
    ),
    (
        "&#x1F6E1;",
        "Industry-Relevant",
        "Stay current with the latest tools and best practices",
    ),
    (
        "&#x1F5C4;",
        "Open Source",
        "Free forever, community-driven, and constantly improving",
    ),
];

pub fn render() -> String {
    let features: String = FEATURES
        .iter()
        .map(|(icon, title, description)| {
            card(
                CardStyle {
                    padding: Size::Lg,
                    shadow: Shadow::Lg,
                    hover: true,
                },
                "feature",
                &format!(
                    r#"<div class="feature-icon">{icon}</div><h3>{title}</h3><p>{description}</p>"#
                ),
            )
        })
        .collect();

    let paths: String = catalog::all()
        .iter()
        .map(|area| {
            format!(
                r#"<a class="path-tile" href="/learning/{id}"><div class="path-stripe bg-{color}"></div><div class="path-body"><div class="path-icon">{icon}</div><h3>{title}</h3><p>{modules} modules • {hours} hours</p></div></a>"#,
                id = area.id,
                color = area.color,
                icon = area.icon,
                title = escape_html(area.title),
                modules = area.module_count,
                hours = area.estimated_hours,
            )
        })
        .collect();

    let start = Button::link("Start Learning Free", "/register")
        .variant(Variant::Warning)
        .size(Size::Lg)
        .icon("&#x2192;")
        .icon_right()
        .render();
    let explore = Button::link("Explore Courses", "/learning-areas")
        .variant(Variant::Outline)
        .size(Size::Lg)
        .render();
    let cta = Button::link("Get Started Now", "/register")
        .variant(Variant::Secondary)
        .size(Size::Lg)
        .icon("&#x2192;")
        .icon_right()
        .render();

    format!(
        r#"<section class="hero"><div class="container narrow center"><h1>Master Modern Tech Skills</h1><p class="lead">Join Virtual Tech Box and learn DevOps, DevSecOps, Data Engineering, Full Stack Development, and AI/ML through interactive, hands-on courses.</p><div class="actions">{start}{explore}</div></div></section>
<section class="section muted"><div class="container"><div class="section-head"><h2>Why Choose Virtual Tech Box?</h2><p>We provide a comprehensive learning experience designed to help you succeed in today&#39;s tech landscape.</p></div><div class="grid grid-3">{features}</div></div></section>
<section class="section"><div class="container"><div class="section-head"><h2>Choose Your Learning Path</h2><p>Select from five comprehensive learning paths designed to accelerate your career in tech.</p></div><div class="grid grid-5">{paths}</div><p class="center"><a class="text-link" href="/learning-areas">View All Learning Paths &#x2192;</a></p></div></section>
<section class="cta"><div class="container center"><h2>Ready to Start Your Journey?</h2><p>Join thousands of learners who are advancing their careers with Virtual Tech Box. It&#39;s completely free and open source!</p>{cta}</div></section>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_lists_every_path() {
        let html = render();
        assert!(html.contains("Master Modern Tech Skills"));
        assert!(html.contains("Ready to Start Your Journey?"));
        for area in catalog::all() {
            assert!(html.contains(&format!(r#"href="/learning/{}""#, area.id)));
        }
        assert!(html.contains("15 modules • 40 hours"));
    }
}

//! Page shell: document head, header navigation, flash notice and footer.

use chrono::{Datelike, Utc};

use super::escape_html;
use super::flash::Flash;
use crate::models::User;

const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/learning-areas", "Learning Areas"),
    ("/about", "About"),
    ("/contact", "Contact"),
];

pub struct PageContext<'a> {
    pub title: &'a str,
    /// Request path, used to highlight the active nav link.
    pub path: &'a str,
    pub user: Option<&'a User>,
    pub flash: Option<&'a Flash>,
}

pub fn layout(ctx: &PageContext<'_>, body: &str) -> String {
    let title = if ctx.title.is_empty() {
        "Virtual Tech Box".to_string()
    } else {
        format!("{} | Virtual Tech Box", escape_html(ctx.title))
    };
    let flash = ctx.flash.map(Flash::render).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/app.css">
</head>
<body>
{header}
<main class="page">{flash}{body}</main>
{footer}
</body>
</html>"#,
        header = header(ctx),
        footer = footer(),
    )
}

fn header(ctx: &PageContext<'_>) -> String {
    let links: String = NAV_LINKS
        .iter()
        .map(|(href, label)| {
            let active = if *href == ctx.path { " nav-active" } else { "" };
            format!(r#"<a class="nav-link{active}" href="{href}">{label}</a>"#)
        })
        .collect();

    let account = match ctx.user {
        Some(user) => format!(
            r#"<div class="nav-user"><span class="nav-welcome">Welcome, {}</span><a class="nav-cta" href="/learning-areas">My Learning</a><form method="post" action="/logout" class="inline-form"><button type="submit" class="nav-logout">Log out</button></form></div>"#,
            escape_html(&user.name)
        ),
        None => r#"<a class="nav-cta" href="/register">Get Started</a>"#.to_string(),
    };

    format!(
        r#"<header class="site-header"><div class="container header-row"><a href="/" class="logo"><span class="logo-mark">VTB</span><span class="logo-text">Virtual Tech Box</span></a><nav class="site-nav">{links}{account}</nav></div></header>"#
    )
}

fn footer() -> String {
    let year = Utc::now().year();
    format!(
        r#"<footer class="site-footer"><div class="container footer-grid"><div><h3>Virtual Tech Box</h3><p>Open-source learning platform for DevOps, DevSecOps, Data Engineering, Full Stack, and AI/ML.</p></div><div><h3>Quick Links</h3><ul><li><a href="/learning-areas">Learning Areas</a></li><li><a href="https://github.com/VirtualTechBox" target="_blank" rel="noopener noreferrer">GitHub Repository</a></li><li><a href="/about">About Us</a></li><li><a href="/contact">Contact</a></li></ul></div><div><h3>Connect With Us</h3><p class="social"><a href="https://github.com/VirtualTechBox" target="_blank" rel="noopener noreferrer">GitHub</a> <a href="mailto:contact@virtualtechbox.com">Email</a> <a href="https://linkedin.com/company/virtualtechbox" target="_blank" rel="noopener noreferrer">LinkedIn</a></p></div></div><div class="container footer-bottom"><p>&copy; {year} Virtual Tech Box. All rights reserved. | Open Source under MIT License</p></div></footer>"#
    )
}

use super::components::{Button, Variant};

pub fn render() -> String {
    let home = Button::link("Go to Homepage", "/")
        .variant(Variant::Primary)
        .icon("&#x2302;")
        .render();
    let browse = Button::link("Browse Learning Areas", "/learning-areas")
        .variant(Variant::Outline)
        .icon("&#x2190;")
        .render();

    format!(
        r#"<section class="not-found"><div class="narrow center"><div class="big-404">404</div><h1>Oops! Page Not Found</h1><p class="lead">The page you&#39;re looking for doesn&#39;t exist or has been moved. Let&#39;s get you back on track!</p><div class="actions">{home}{browse}</div><div class="tip"><p><strong>Tip:</strong> If you bookmarked this page, the content might have been moved or updated. Check out our learning areas to find what you&#39;re looking for!</p></div></div></section>"#
    )
}

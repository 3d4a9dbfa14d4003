use super::components::{card, Button, CardStyle, FormInput, Shadow, Size, Variant};
use super::escape_html;
use crate::catalog;
use crate::services::validation::{
    FieldErrors, RegistrationForm, FIELD_AREA, FIELD_EMAIL, FIELD_NAME, FIELD_PHONE,
};

pub fn render(form: &RegistrationForm, errors: &FieldErrors) -> String {
    let inputs = [
        FormInput {
            label: "Full Name",
            name: FIELD_NAME,
            input_type: "text",
            placeholder: "Enter your full name",
            icon: Some("&#x1F464;"),
            value: &form.name,
            error: errors.get(FIELD_NAME).copied(),
        },
        FormInput {
            label: "Email Address",
            name: FIELD_EMAIL,
            input_type: "email",
            placeholder: "Enter your email",
            icon: Some("&#x2709;"),
            value: &form.email,
            error: errors.get(FIELD_EMAIL).copied(),
        },
        FormInput {
            label: "Phone Number",
            name: FIELD_PHONE,
            input_type: "tel",
            placeholder: "Enter your phone number",
            icon: Some("&#x260E;"),
            value: &form.phone_number,
            error: errors.get(FIELD_PHONE).copied(),
        },
    ];
    let inputs: String = inputs.iter().map(FormInput::render).collect();

    let selected = form.learning_area.as_deref().map(str::trim);
    let areas: String = catalog::all()
        .iter()
        .map(|area| {
            let checked = selected == Some(area.id.as_str());
            format!(
                r#"<label class="area-option{active}"><input type="radio" name="{FIELD_AREA}" value="{id}"{checked}><span class="area-icon">{icon}</span><span><strong>{title}</strong><small>{modules} modules</small></span></label>"#,
                active = if checked { " selected" } else { "" },
                checked = if checked { " checked" } else { "" },
                id = area.id,
                icon = area.icon,
                title = escape_html(area.title),
                modules = area.module_count,
            )
        })
        .collect();
    let area_error = errors
        .get(FIELD_AREA)
        .map(|message| format!(r#"<p class="field-error">{}</p>"#, escape_html(message)))
        .unwrap_or_default();

    let submit = Button::submit("Start Learning")
        .variant(Variant::Primary)
        .size(Size::Lg)
        .full_width()
        .render();

    let form_html = format!(
        r#"<form method="post" action="/register" class="stack" novalidate>{inputs}<fieldset class="field"><legend>&#x1F4D6; Choose Your Learning Area</legend><div class="grid grid-2">{areas}</div>{area_error}</fieldset>{submit}</form>"#
    );

    format!(
        r#"<section class="section muted"><div class="container narrow"><div class="section-head"><h1>Start Your Learning Journey</h1><p>Register now to access free, interactive courses in cutting-edge technologies</p></div>{}<div class="center fine-print"><p>By registering, you agree to our open-source principles and community guidelines.</p><p>Your information will be stored securely and used only for platform improvements.</p></div></div></section>"#,
        card(
            CardStyle {
                padding: Size::Lg,
                shadow: Shadow::Lg,
                hover: false,
            },
            "",
            &form_html
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_has_every_area() {
        let html = render(&RegistrationForm::default(), &FieldErrors::new());
        for area in catalog::all() {
            assert!(html.contains(&format!(r#"value="{}""#, area.id)));
        }
        assert!(!html.contains(" checked"));
        assert!(!html.contains("field-error"));
    }

    #[test]
    fn errors_and_values_are_shown() {
        let form = RegistrationForm {
            name: "A".to_string(),
            email: "a@b.co".to_string(),
            phone_number: String::new(),
            learning_area: Some("devsecops".to_string()),
        };
        let errors = form.validate().unwrap_err();
        let html = render(&form, &errors);
        assert!(html.contains("Name must be at least 2 characters"));
        assert!(html.contains("Phone number is required"));
        assert!(html.contains(r#"value="a@b.co""#));
        assert!(html.contains(r#"value="devsecops" checked"#));
    }
}

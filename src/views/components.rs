//! Reusable UI primitives: button, card, modal, form input.

use super::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Outline,
}

impl Variant {
    fn class(&self) -> &'static str {
        match self {
            Variant::Primary => "btn-primary",
            Variant::Secondary => "btn-secondary",
            Variant::Success => "btn-success",
            Variant::Warning => "btn-warning",
            Variant::Danger => "btn-danger",
            Variant::Outline => "btn-outline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    Sm,
    #[default]
    Md,
    Lg,
}

impl Size {
    fn suffix(&self) -> &'static str {
        match self {
            Size::Sm => "sm",
            Size::Md => "md",
            Size::Lg => "lg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ButtonTarget {
    Submit,
    Plain,
    Link(String),
}

#[derive(Debug, Clone)]
pub struct Button {
    label: String,
    target: ButtonTarget,
    variant: Variant,
    size: Size,
    icon: Option<&'static str>,
    icon_right: bool,
    loading: bool,
    disabled: bool,
    full_width: bool,
    onclick: Option<String>,
}

impl Button {
    pub fn submit(label: impl Into<String>) -> Self {
        Self::with_target(label, ButtonTarget::Submit)
    }

    pub fn plain(label: impl Into<String>) -> Self {
        Self::with_target(label, ButtonTarget::Plain)
    }

    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self::with_target(label, ButtonTarget::Link(href.into()))
    }

    fn with_target(label: impl Into<String>, target: ButtonTarget) -> Self {
        Self {
            label: label.into(),
            target,
            variant: Variant::default(),
            size: Size::default(),
            icon: None,
            icon_right: false,
            loading: false,
            disabled: false,
            full_width: false,
            onclick: None,
        }
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn icon_right(mut self) -> Self {
        self.icon_right = true;
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    /// Trusted inline script; never pass user input here.
    pub fn onclick(mut self, script: impl Into<String>) -> Self {
        self.onclick = Some(script.into());
        self
    }

    pub fn render(&self) -> String {
        let mut class = format!("btn {} btn-{}", self.variant.class(), self.size.suffix());
        if self.full_width {
            class.push_str(" btn-block");
        }
        let inactive = self.disabled || self.loading;
        if inactive {
            class.push_str(" btn-disabled");
        }

        let mut inner = String::new();
        if self.loading {
            inner.push_str(r#"<span class="spinner" aria-hidden="true"></span>"#);
        } else if let Some(icon) = self.icon.filter(|_| !self.icon_right) {
            inner.push_str(&format!(r#"<span class="btn-icon">{icon}</span>"#));
        }
        inner.push_str(&escape_html(&self.label));
        if let Some(icon) = self.icon.filter(|_| self.icon_right && !self.loading) {
            inner.push_str(&format!(r#"<span class="btn-icon btn-icon-right">{icon}</span>"#));
        }

        let onclick = self
            .onclick
            .as_deref()
            .map(|script| format!(r#" onclick="{}""#, escape_html(script)))
            .unwrap_or_default();

        match &self.target {
            ButtonTarget::Link(href) if !inactive => format!(
                r#"<a class="{class}" href="{}"{onclick}>{inner}</a>"#,
                escape_html(href)
            ),
            ButtonTarget::Link(_) => {
                format!(r#"<span class="{class}" aria-disabled="true">{inner}</span>"#)
            }
            ButtonTarget::Submit | ButtonTarget::Plain => {
                let kind = if self.target == ButtonTarget::Submit {
                    "submit"
                } else {
                    "button"
                };
                let disabled = if inactive { " disabled" } else { "" };
                format!(r#"<button type="{kind}" class="{class}"{disabled}{onclick}>{inner}</button>"#)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardStyle {
    pub padding: Size,
    pub shadow: Shadow,
    pub hover: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shadow {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl Shadow {
    fn class(&self) -> &'static str {
        match self {
            Shadow::Sm => "shadow-sm",
            Shadow::Md => "shadow-md",
            Shadow::Lg => "shadow-lg",
            Shadow::Xl => "shadow-xl",
        }
    }
}

/// `body` is already-rendered HTML.
pub fn card(style: CardStyle, extra_class: &str, body: &str) -> String {
    let hover = if style.hover { " card-hover" } else { "" };
    format!(
        r#"<div class="card card-pad-{} {}{hover} {}">{body}</div>"#,
        style.padding.suffix(),
        style.shadow.class(),
        escape_html(extra_class)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

#[derive(Debug, Clone)]
pub struct Modal<'a> {
    pub id: &'a str,
    pub title: Option<&'a str>,
    pub size: ModalSize,
    pub show_close_button: bool,
    pub open: bool,
}

impl<'a> Modal<'a> {
    pub fn new(id: &'a str) -> Self {
        Self {
            id,
            title: None,
            size: ModalSize::Md,
            show_close_button: true,
            open: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    /// Script that opens this modal, for a trigger button.
    pub fn open_script(&self) -> String {
        format!("document.getElementById('{}').showModal()", self.id)
    }

    /// `body` is already-rendered HTML.
    pub fn render(&self, body: &str) -> String {
        let size = match self.size {
            ModalSize::Sm => "modal-sm",
            ModalSize::Md => "modal-md",
            ModalSize::Lg => "modal-lg",
            ModalSize::Xl => "modal-xl",
        };
        let open = if self.open { " open" } else { "" };

        let mut header = String::new();
        if self.title.is_some() || self.show_close_button {
            header.push_str(r#"<div class="modal-header">"#);
            if let Some(title) = self.title {
                header.push_str(&format!("<h2>{}</h2>", escape_html(title)));
            }
            if self.show_close_button {
                header.push_str(
                    r#"<form method="dialog"><button class="modal-close" aria-label="Close">&#x2715;</button></form>"#,
                );
            }
            header.push_str("</div>");
        }

        format!(
            r#"<dialog id="{}" class="modal {size}"{open}>{header}<div class="modal-body">{body}</div></dialog>"#,
            escape_html(self.id)
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormInput<'a> {
    pub label: &'a str,
    pub name: &'a str,
    pub input_type: &'a str,
    pub placeholder: &'a str,
    pub icon: Option<&'a str>,
    pub value: &'a str,
    pub error: Option<&'a str>,
}

impl FormInput<'_> {
    pub fn render(&self) -> String {
        let input_type = if self.input_type.is_empty() {
            "text"
        } else {
            self.input_type
        };
        let icon = self
            .icon
            .map(|icon| format!(r#"<span class="input-icon">{icon}</span>"#))
            .unwrap_or_default();
        let state = if self.error.is_some() {
            "input input-error"
        } else {
            "input"
        };
        let error = self
            .error
            .map(|message| format!(r#"<p class="field-error">{}</p>"#, escape_html(message)))
            .unwrap_or_default();

        format!(
            r#"<div class="field"><label for="{name}">{icon}{label}</label><input id="{name}" name="{name}" type="{input_type}" placeholder="{placeholder}" value="{value}" class="{state}">{error}</div>"#,
            name = escape_html(self.name),
            label = escape_html(self.label),
            placeholder = escape_html(self.placeholder),
            value = escape_html(self.value),
        )
    }
}

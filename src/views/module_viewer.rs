//! The learning module page: area header, module sidebar, lesson tabs and
//! the current lesson with its exercise, examples, resources and quiz.

use std::collections::HashSet;

use super::components::{card, Button, CardStyle, Modal, Size, Variant};
use super::escape_html;
use super::markdown;
use crate::catalog::LearningAreaInfo;
use crate::models::{Lesson, LessonKind, Module, Quiz};
use crate::services::exercise::{ExerciseRun, CHALLENGE, HINTS, STARTER_CODE};
use crate::services::progress::{is_locked, percent};

pub struct ModulePage<'a> {
    pub area: &'static LearningAreaInfo,
    pub modules: &'a [Module],
    pub completed_modules: &'a HashSet<String>,
    /// `None` renders the empty-selection view.
    pub current: Option<CurrentModule<'a>>,
}

pub struct CurrentModule<'a> {
    pub module: &'a Module,
    pub lessons: &'a [Lesson],
    pub lesson_index: usize,
    pub completed_lessons: &'a HashSet<String>,
    pub exercise: Option<ExerciseState<'a>>,
    pub quiz_score: Option<u32>,
}

/// Editor contents and the last run, if any.
pub struct ExerciseState<'a> {
    pub code: &'a str,
    pub run: Option<&'a ExerciseRun>,
}

pub fn render(page: &ModulePage<'_>) -> String {
    let main = match &page.current {
        Some(current) => module_content(page, current),
        None => r#"<div class="empty-state"><p>Select a module to begin learning</p></div>"#
            .to_string(),
    };

    format!(
        r#"<div class="module-page">{header}<div class="module-layout"><aside class="module-sidebar">{sidebar}</aside><section class="module-main">{main}</section></div></div>"#,
        header = area_header(page),
        sidebar = module_list(page),
    )
}

fn area_header(page: &ModulePage<'_>) -> String {
    let done = page
        .modules
        .iter()
        .filter(|m| page.completed_modules.contains(&m.id))
        .count();
    let total = page.modules.len();

    format!(
        r#"<div class="module-header"><div class="container"><div class="header-title"><a class="back" href="/learning-areas" aria-label="Back to learning areas">&#x2039;</a><div><h1><span class="area-icon">{icon}</span>{title}</h1><p class="muted-text">{done} of {total} modules completed</p></div></div>{bar}</div></div>"#,
        icon = page.area.icon,
        title = escape_html(page.area.title),
        bar = progress_bar(percent(done, total)),
    )
}

fn progress_bar(pct: u32) -> String {
    format!(
        r#"<div class="progress-bar" role="progressbar" aria-valuenow="{pct}" aria-valuemin="0" aria-valuemax="100"><div class="progress-bar-fill" style="width: {pct}%"></div></div>"#
    )
}

fn module_list(page: &ModulePage<'_>) -> String {
    let current_id = page.current.as_ref().map(|c| c.module.id.as_str());
    let items: String = page
        .modules
        .iter()
        .enumerate()
        .map(|(index, module)| {
            let completed = page.completed_modules.contains(&module.id);
            let locked = is_locked(page.modules, index, page.completed_modules);
            let state = if current_id == Some(module.id.as_str()) {
                "current"
            } else if completed {
                "completed"
            } else if locked {
                "locked"
            } else {
                "open"
            };
            let mut badges = String::new();
            if completed {
                badges.push_str(r#"<span class="badge-done" aria-label="Completed">&#x2713;</span>"#);
            }
            if locked {
                badges.push_str(r#"<span class="badge-lock" aria-label="Locked">&#x1F512;</span>"#);
            }

            let inner = format!(
                r#"<span class="module-order">Module {order}</span>{badges}<h3>{title}</h3><p>{description}</p><span class="module-time">&#x23F1; {minutes} min</span>"#,
                order = module.order,
                title = escape_html(&module.title),
                description = escape_html(&module.description),
                minutes = module.estimated_minutes,
            );
            if locked {
                format!(r#"<li class="module-item {state}" aria-disabled="true">{inner}</li>"#)
            } else {
                format!(
                    r#"<li class="module-item {state}"><a href="{href}">{inner}</a></li>"#,
                    href = module_href(page.area, &module.id, None),
                )
            }
        })
        .collect();

    format!(r#"<h2>Course Modules</h2><ul class="module-list">{items}</ul>"#)
}

fn module_content(page: &ModulePage<'_>, current: &CurrentModule<'_>) -> String {
    let module = current.module;
    let mut out = format!(
        r#"<div class="module-content"><div class="module-intro"><h1>{}</h1><p class="lead">{}</p></div>"#,
        escape_html(&module.title),
        escape_html(&module.description)
    );

    out.push_str(&lesson_tabs(page.area, current));
    if let Some(lesson) = current.lessons.get(current.lesson_index) {
        out.push_str(&card(
            CardStyle::default(),
            "lesson",
            &lesson_body(page.area, current, lesson),
        ));
    }
    out.push_str(&module_progress(current));
    if let Some(quiz) = module.quiz.as_ref().filter(|q| !q.questions.is_empty()) {
        out.push_str(&quiz_form(page.area, module, quiz, current.quiz_score));
    }
    out.push_str(&module_nav(page, module));
    out.push_str("</div>");
    out
}

fn lesson_icon(kind: LessonKind) -> &'static str {
    match kind {
        LessonKind::Video => "&#x25B6;",
        LessonKind::Code => "&lt;/&gt;",
        LessonKind::Interactive => "&#x2714;",
        LessonKind::Text => "&#x1F4C4;",
    }
}

fn lesson_tabs(area: &LearningAreaInfo, current: &CurrentModule<'_>) -> String {
    let tabs: String = current
        .lessons
        .iter()
        .enumerate()
        .map(|(index, lesson)| {
            let active = if index == current.lesson_index { " active" } else { "" };
            let done = if current.completed_lessons.contains(&lesson.id) {
                r#"<span class="badge-done">&#x2713;</span>"#
            } else {
                ""
            };
            format!(
                r#"<a class="lesson-tab{active}" href="{href}"><span class="lesson-icon">{icon}</span>{title}{done}</a>"#,
                href = module_href(area, &current.module.id, Some(index)),
                icon = lesson_icon(lesson.kind),
                title = escape_html(&lesson.title),
            )
        })
        .collect();
    format!(r#"<nav class="lesson-tabs">{tabs}</nav>"#)
}

fn lesson_body(area: &LearningAreaInfo, current: &CurrentModule<'_>, lesson: &Lesson) -> String {
    let mut out = format!(
        r#"<h2 class="lesson-title"><span class="lesson-icon">{}</span>{}</h2>"#,
        lesson_icon(lesson.kind),
        escape_html(&lesson.title)
    );

    let content = match lesson.kind {
        LessonKind::Interactive => exercise_panel(area, current, lesson),
        LessonKind::Video if is_url(lesson.content.trim()) => format!(
            r#"<div class="video"><video controls preload="metadata" src="{0}"></video><p><a href="{0}" target="_blank" rel="noopener noreferrer">Open video</a></p></div>"#,
            escape_html(lesson.content.trim())
        ),
        _ => format!(r#"<div class="prose">{}</div>"#, markdown::render(&lesson.content)),
    };
    out.push_str(&content);

    if !lesson.code_examples.is_empty() {
        out.push_str(r#"<div class="code-examples"><h3>Code Examples</h3>"#);
        for example in &lesson.code_examples {
            out.push_str(r#"<div class="code-example">"#);
            if let Some(title) = &example.title {
                out.push_str(&format!("<h4>{}</h4>", escape_html(title)));
            }
            if let Some(description) = &example.description {
                out.push_str(&format!(r#"<p class="muted-text">{}</p>"#, escape_html(description)));
            }
            out.push_str(&markdown::code_block(&example.language, &example.code));
            out.push_str("</div>");
        }
        out.push_str("</div>");
    }

    if !lesson.resources.is_empty() {
        let items: String = lesson
            .resources
            .iter()
            .map(|resource| {
                let title = escape_html(&resource.title);
                let url = resource.url.trim();
                let label = if is_url(url) {
                    format!(
                        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{title}</a>"#,
                        escape_html(url)
                    )
                } else {
                    format!("<span>{title}</span>")
                };
                format!(
                    r#"<li>{label} <small>({})</small></li>"#,
                    resource.kind.label()
                )
            })
            .collect();
        out.push_str(&format!(
            r#"<div class="resources"><h3>Additional Resources</h3><ul>{items}</ul></div>"#
        ));
    }

    out.push_str(&lesson_nav(area, current, lesson));
    out
}

fn is_url(s: &str) -> bool {
    s.starts_with("https://") || s.starts_with("http://")
}

fn lesson_nav(area: &LearningAreaInfo, current: &CurrentModule<'_>, lesson: &Lesson) -> String {
    let total = current.lessons.len();
    let completed = current.completed_lessons.contains(&lesson.id);
    let button = if completed {
        Button::plain("Completed")
            .variant(Variant::Success)
            .disabled(true)
            .render()
    } else {
        let label = if current.lesson_index + 1 == total {
            "Complete Module"
        } else {
            "Complete & Next"
        };
        format!(
            r#"<form method="post" action="{action}" class="inline-form">{button}</form>"#,
            action = lesson_action(area, &current.module.id, &lesson.id, "complete"),
            button = Button::submit(label).render(),
        )
    };

    format!(
        r#"<div class="lesson-nav"><span class="muted-text">Lesson {} of {total}</span>{button}</div>"#,
        current.lesson_index + 1
    )
}

fn exercise_panel(area: &LearningAreaInfo, current: &CurrentModule<'_>, lesson: &Lesson) -> String {
    let state = current.exercise.as_ref();
    let code = state.map(|s| s.code).unwrap_or(STARTER_CODE);
    let run = state.and_then(|s| s.run);

    let reset = Button::link("Reset", module_href(area, &current.module.id, Some(current.lesson_index)))
        .variant(Variant::Outline)
        .size(Size::Sm)
        .icon("&#x21BB;")
        .render();
    let run_button = Button::submit("Run Code").icon("&#x25B6;").render();

    let mut out = format!(
        r#"<div class="exercise"><div class="challenge"><h3>Challenge</h3><p>{challenge}</p></div><form method="post" action="{action}"><div class="editor-head"><label for="code">Code Editor</label>{reset}</div><textarea id="code" name="code" class="code-editor" spellcheck="false">{code}</textarea><div class="actions">{run_button}</div></form>"#,
        challenge = escape_html(CHALLENGE),
        action = lesson_action(area, &current.module.id, &lesson.id, "run"),
        code = escape_html(code),
    );

    if let Some(run) = run {
        let results: String = run
            .results
            .iter()
            .map(|test| {
                let (class, mark) = if test.passed {
                    ("pass", "&#x2713;")
                } else {
                    ("fail", "&#x2717;")
                };
                format!(
                    r#"<div class="test-result {class}"><span class="mark">{mark}</span><div><p class="test-name">{}</p><p>{}</p></div></div>"#,
                    escape_html(test.name),
                    escape_html(test.message)
                )
            })
            .collect();
        out.push_str(&format!(
            r#"<div class="test-results"><h3>Test Results</h3>{results}</div><div class="console"><h3>Console Output</h3><pre>{}</pre></div>"#,
            escape_html(&run.output)
        ));
        if run.all_passed {
            out.push_str(
                r#"<div class="success-banner"><div class="big-check">&#x2713;</div><h3>Excellent Work! 🎉</h3><p>You&#39;ve successfully completed this challenge. Great job!</p></div>"#,
            );
        }
    }

    let modal = Modal::new("exercise-hints").title("Need a hint?");
    let hints: String = HINTS
        .iter()
        .map(|hint| format!(r#"<p class="hint">💡 {}</p>"#, escape_html(hint)))
        .collect();
    let trigger = Button::plain("Need a hint?")
        .variant(Variant::Secondary)
        .size(Size::Sm)
        .onclick(modal.open_script())
        .render();
    out.push_str(&format!(r#"<div class="hints">{trigger}{}</div>"#, modal.render(&hints)));

    out.push_str("</div>");
    out
}

fn module_progress(current: &CurrentModule<'_>) -> String {
    let total = current.lessons.len();
    let done = current
        .lessons
        .iter()
        .filter(|l| current.completed_lessons.contains(&l.id))
        .count();
    format!(
        r#"<div class="module-progress"><div class="row"><span>Module Progress</span><span class="muted-text">{done} / {total} lessons completed</span></div>{}</div>"#,
        progress_bar(percent(done, total))
    )
}

fn quiz_form(area: &LearningAreaInfo, module: &Module, quiz: &Quiz, score: Option<u32>) -> String {
    let questions: String = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(number, question)| {
            let options: String = question
                .options
                .iter()
                .enumerate()
                .map(|(index, option)| {
                    format!(
                        r#"<label class="quiz-option"><input type="radio" name="q_{id}" value="{index}"> {text}</label>"#,
                        id = escape_html(&question.id),
                        text = escape_html(option),
                    )
                })
                .collect();
            format!(
                r#"<fieldset class="quiz-question"><legend>{}. {}</legend>{options}</fieldset>"#,
                number + 1,
                escape_html(&question.question)
            )
        })
        .collect();

    let last = score
        .map(|score| {
            let verdict = if score >= quiz.passing_score {
                "passed"
            } else {
                "not passed yet"
            };
            format!(r#"<p class="quiz-score">Last score: {score}% ({verdict})</p>"#)
        })
        .unwrap_or_default();

    format!(
        r#"<div class="quiz"><h3>Module Quiz</h3><p class="muted-text">Score {passing}% or higher to pass.</p>{last}<form method="post" action="{action}">{questions}{submit}</form></div>"#,
        passing = quiz.passing_score,
        action = format!("/learning/{}/module/{}/quiz", area.id, urlencoding::encode(&module.id)),
        submit = Button::submit("Submit Answers").render(),
    )
}

fn module_nav(page: &ModulePage<'_>, module: &Module) -> String {
    let index = page
        .modules
        .iter()
        .position(|m| m.id == module.id)
        .unwrap_or_default();

    let prev = match index.checked_sub(1).and_then(|i| page.modules.get(i)) {
        Some(prev) => Button::link("Previous Module", module_href(page.area, &prev.id, None)),
        None => Button::link("Previous Module", "#").disabled(true),
    }
    .variant(Variant::Outline)
    .icon("&#x2039;")
    .render();

    let next = match page.modules.get(index + 1) {
        Some(next) => Button::link("Next Module", module_href(page.area, &next.id, None))
            .variant(Variant::Primary)
            .icon("&#x203A;")
            .icon_right(),
        None => Button::link("Complete Course", "/learning-areas")
            .variant(Variant::Success)
            .icon("&#x2713;"),
    }
    .render();

    format!(r#"<div class="module-nav">{prev}{next}</div>"#)
}

pub fn module_href(area: &LearningAreaInfo, module_id: &str, lesson: Option<usize>) -> String {
    let base = format!("/learning/{}/module/{}", area.id, urlencoding::encode(module_id));
    match lesson {
        Some(index) => format!("{base}?lesson={index}"),
        None => base,
    }
}

fn lesson_action(area: &LearningAreaInfo, module_id: &str, lesson_id: &str, verb: &str) -> String {
    format!(
        "{}/lessons/{}/{verb}",
        module_href(area, module_id, None),
        urlencoding::encode(lesson_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LearningArea;
    use crate::models::{Question, Resource, ResourceKind};
    use crate::services::exercise::{all_passed, evaluate, render_output};
    use crate::services::mock_content::{mock_lessons, mock_modules};

    fn page_for<'a>(
        modules: &'a [Module],
        completed: &'a HashSet<String>,
        current: Option<CurrentModule<'a>>,
    ) -> ModulePage<'a> {
        ModulePage {
            area: LearningArea::DevOps.info(),
            modules,
            completed_modules: completed,
            current,
        }
    }

    #[test]
    fn empty_selection_prompt() {
        let modules = mock_modules(LearningArea::DevOps);
        let completed = HashSet::new();
        let html = render(&page_for(&modules, &completed, None));
        assert!(html.contains("Select a module to begin learning"));
        assert!(html.contains("0 of 3 modules completed"));
    }

    #[test]
    fn sidebar_locks_until_previous_complete() {
        let modules = mock_modules(LearningArea::DevOps);
        let completed: HashSet<String> = ["devops-1".to_string()].into();
        let lessons = mock_lessons("devops-2");
        let no_lessons = HashSet::new();
        let html = render(&page_for(
            &modules,
            &completed,
            Some(CurrentModule {
                module: &modules[1],
                lessons: &lessons,
                lesson_index: 0,
                completed_lessons: &no_lessons,
                exercise: None,
                quiz_score: None,
            }),
        ));

        assert!(html.contains("1 of 3 modules completed"));
        assert!(html.contains(r#"<li class="module-item completed">"#));
        assert!(html.contains(r#"<li class="module-item current">"#));
        assert!(html.contains(r#"<li class="module-item locked" aria-disabled="true">"#));
        assert!(html.contains(r#"href="/learning/devops/module/devops-1""#));
        assert!(html.contains("Complete &amp; Next"));
        assert!(html.contains("Lesson 1 of 3"));
        assert!(html.contains("<h1>Welcome to this module!</h1>"));
    }

    #[test]
    fn last_module_offers_complete_course() {
        let modules = mock_modules(LearningArea::DevOps);
        let completed = HashSet::new();
        let lessons = mock_lessons("devops-3");
        let done: HashSet<String> = lessons.iter().map(|l| l.id.clone()).collect();
        let html = render(&page_for(
            &modules,
            &completed,
            Some(CurrentModule {
                module: &modules[2],
                lessons: &lessons,
                lesson_index: 2,
                completed_lessons: &done,
                exercise: None,
                quiz_score: None,
            }),
        ));

        assert!(html.contains("Complete Course"));
        assert!(!html.contains("Next Module"));
        assert!(html.contains("3 / 3 lessons completed"));
        assert!(html.contains(">Completed</button>"));
        assert!(html.contains("Code Examples"));
        assert!(html.contains(r#"class="language-python""#));
    }

    #[test]
    fn exercise_panel_shows_run_results() {
        let modules = mock_modules(LearningArea::DevOps);
        let completed = HashSet::new();
        let lessons = mock_lessons("devops-1");
        let no_lessons = HashSet::new();
        let code = "def solution():\n    numbers = [1, 2, 3, 4, 5, 6]\n    total = sum(n * n for n in numbers)\n    return total + 42\n\nprint(solution())\n";
        let results = evaluate(code);
        let run = ExerciseRun {
            output: render_output(&results),
            all_passed: all_passed(&results),
            results,
        };
        let html = render(&page_for(
            &modules,
            &completed,
            Some(CurrentModule {
                module: &modules[0],
                lessons: &lessons,
                lesson_index: 1,
                completed_lessons: &no_lessons,
                exercise: Some(ExerciseState {
                    code,
                    run: Some(&run),
                }),
                quiz_score: None,
            }),
        ));

        assert!(html.contains("Test Results"));
        assert!(html.contains("Console Output"));
        assert!(html.contains("Excellent Work!"));
        assert!(html.contains("return total + 42"));
        assert!(html.contains(r#"action="/learning/devops/module/devops-1/lessons/devops-1-lesson-2/run""#));
        assert!(html.contains(r#"<dialog id="exercise-hints""#));
    }

    #[test]
    fn quiz_form_lists_options() {
        let mut modules = mock_modules(LearningArea::DevOps);
        modules[0].quiz = Some(Quiz {
            id: "quiz-1".to_string(),
            questions: vec![Question {
                id: "q1".to_string(),
                question: "What does CI stand for?".to_string(),
                options: vec!["Continuous Integration".to_string(), "Code Inspection".to_string()],
                correct_answer: 0,
                explanation: None,
            }],
            passing_score: 70,
        });
        let completed = HashSet::new();
        let lessons = mock_lessons("devops-1");
        let no_lessons = HashSet::new();
        let html = render(&page_for(
            &modules,
            &completed,
            Some(CurrentModule {
                module: &modules[0],
                lessons: &lessons,
                lesson_index: 0,
                completed_lessons: &no_lessons,
                exercise: None,
                quiz_score: Some(100),
            }),
        ));

        assert!(html.contains(r#"name="q_q1" value="1""#));
        assert!(html.contains("Last score: 100% (passed)"));
        assert!(html.contains(r#"action="/learning/devops/module/devops-1/quiz""#));
    }

    #[test]
    fn resources_link_only_to_web_urls() {
        let modules = mock_modules(LearningArea::DevOps);
        let completed = HashSet::new();
        let mut lessons = mock_lessons("devops-1");
        lessons[0].resources = vec![
            Resource {
                title: "Docker Docs".to_string(),
                url: "https://docs.docker.com".to_string(),
                kind: ResourceKind::Documentation,
            },
            Resource {
                title: "Sneaky".to_string(),
                url: "javascript:alert(1)".to_string(),
                kind: ResourceKind::Article,
            },
        ];
        let no_lessons = HashSet::new();
        let html = render(&page_for(
            &modules,
            &completed,
            Some(CurrentModule {
                module: &modules[0],
                lessons: &lessons,
                lesson_index: 0,
                completed_lessons: &no_lessons,
                exercise: None,
                quiz_score: None,
            }),
        ));

        assert!(html.contains(r#"<a href="https://docs.docker.com" target="_blank""#));
        assert!(html.contains("<span>Sneaky</span>"));
        assert!(!html.contains("javascript:"));
    }
}

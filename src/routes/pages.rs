use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::catalog::LearningArea;
use crate::models::{Lesson, Module};
use crate::services::exercise::ExerciseRun;
use crate::services::learning::{find_module, neighbors, ModuleSet};
use crate::services::progress::{grade, LessonAdvance};
use crate::services::validation::{FieldErrors, RegistrationForm};
use crate::state::AppState;
use crate::views::flash::{clear_cookie_header, read_flash, Flash};
use crate::views::module_viewer::{module_href, CurrentModule, ExerciseState, ModulePage};
use crate::views::{self, layout, PageContext};

const REGISTERED: &str = "Registration successful! Welcome to Virtual Tech Box!";
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
const REGISTRATION_NOT_SAVED: &str =
    "Your registration could not be saved on this device. Please try again.";
const LOGOUT_FAILED: &str = "Could not sign you out. Please try again.";
const MODULE_COMPLETED: &str = "Module completed! Great job! 🎉";
const PATH_COMPLETED: &str =
    "Congratulations! You've completed all modules in this learning path! 🏆";

/// Wraps `body` in the page chrome. A flash cookie on the request is shown
/// once and cleared on the way out; `flash` takes precedence over it.
fn page(
    state: &AppState,
    headers: &HeaderMap,
    title: &str,
    path: &str,
    flash: Option<Flash>,
    body: &str,
) -> Response {
    let incoming = read_flash(headers);
    let shown = flash.or_else(|| incoming.clone());
    let user = state.session().user();

    let html = layout(
        &PageContext {
            title,
            path,
            user: user.as_ref(),
            flash: shown.as_ref(),
        },
        body,
    );

    let mut response = Html(html).into_response();
    if incoming.is_some() {
        response
            .headers_mut()
            .append(header::SET_COOKIE, clear_cookie_header());
    }
    response
}

fn redirect_with_flash(location: &str, flash: Flash) -> Response {
    let mut response = Redirect::to(location).into_response();
    match flash.set_cookie_header() {
        Some(cookie) => {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        None => warn!("flash message could not be encoded as a cookie"),
    }
    response
}

fn not_found_redirect() -> Response {
    Redirect::to("/404").into_response()
}

fn register_redirect() -> Response {
    Redirect::to("/register").into_response()
}

pub async fn home(State(state): State<AppState>, headers: HeaderMap) -> Response {
    page(&state, &headers, "Home", "/", None, &views::home::render())
}

pub async fn registration_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let body = views::registration::render(&RegistrationForm::default(), &FieldErrors::new());
    page(&state, &headers, "Register", "/register", None, &body)
}

pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RegistrationForm>,
) -> Response {
    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(errors) => {
            let body = views::registration::render(&form, &errors);
            let response = page(&state, &headers, "Register", "/register", None, &body);
            return (StatusCode::UNPROCESSABLE_ENTITY, response).into_response();
        }
    };

    let response = state.api().register_user(&registration).await;
    let message = match response.into_data(REGISTRATION_FAILED) {
        Ok(remote) => {
            let registered_at = remote
                .registered_at
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
            let area = registration.learning_area;
            match state
                .session()
                .set_user(Some(registration.into_user(Some(registered_at))))
            {
                Ok(()) => {
                    info!(%area, "user registered");
                    return redirect_with_flash(
                        &format!("/learning/{area}"),
                        Flash::success(REGISTERED),
                    );
                }
                Err(err) => {
                    error!(error = %err, "registered user could not be stored");
                    REGISTRATION_NOT_SAVED.to_string()
                }
            }
        }
        Err(message) => {
            warn!(error = %message, "registration rejected");
            message
        }
    };

    let body = views::registration::render(&form, &FieldErrors::new());
    page(
        &state,
        &headers,
        "Register",
        "/register",
        Some(Flash::error(message)),
        &body,
    )
}

pub async fn logout(State(state): State<AppState>) -> Response {
    match state.session().clear_user() {
        Ok(()) => {
            info!("user logged out");
            Redirect::to("/").into_response()
        }
        Err(err) => {
            error!(error = %err, "user could not be removed from storage");
            redirect_with_flash("/", Flash::error(LOGOUT_FAILED))
        }
    }
}

pub async fn learning_areas(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = state.session().user();
    let body = views::catalog::render(user.as_ref());
    page(
        &state,
        &headers,
        "Learning Areas",
        "/learning-areas",
        None,
        &body,
    )
}

pub async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let response = page(
        &state,
        &headers,
        "Page Not Found",
        "/404",
        None,
        &views::not_found::render(),
    );
    (StatusCode::NOT_FOUND, response).into_response()
}

/// Resolves the area and its module list. `Err` carries the redirect to
/// send instead: `/404` for an unknown area, `/register` when the API
/// rejected our credentials.
async fn load_area(state: &AppState, raw: &str) -> Result<(LearningArea, ModuleSet), Response> {
    let area: LearningArea = raw.parse().map_err(|_| not_found_redirect())?;
    let set = state.learning().load_modules(area).await;
    if set.unauthorized {
        return Err(register_redirect());
    }
    Ok((area, set))
}

pub async fn area_entry(
    State(state): State<AppState>,
    Path(area): Path<String>,
    headers: HeaderMap,
) -> Response {
    let (area, set) = match load_area(&state, &area).await {
        Ok(loaded) => loaded,
        Err(redirect) => return redirect,
    };

    match set.modules.first() {
        Some(first) => Redirect::to(&module_href(area.info(), &first.id, None)).into_response(),
        None => render_module_page(&state, &headers, area, &set.modules, None),
    }
}

#[derive(Debug, Deserialize)]
pub struct LessonQuery {
    lesson: Option<usize>,
}

pub async fn module_page(
    State(state): State<AppState>,
    Path((area, module_id)): Path<(String, String)>,
    Query(query): Query<LessonQuery>,
    headers: HeaderMap,
) -> Response {
    let (area, set) = match load_area(&state, &area).await {
        Ok(loaded) => loaded,
        Err(redirect) => return redirect,
    };

    let Some(module) = find_module(&set.modules, &module_id) else {
        return render_module_page(&state, &headers, area, &set.modules, None);
    };

    let Ok(lessons) = state.learning().lessons_for(area, module, set.source).await else {
        return register_redirect();
    };
    state.progress().visit(area, &module.id);
    let lesson_index = query
        .lesson
        .unwrap_or(0)
        .min(lessons.len().saturating_sub(1));

    render_module_page(
        &state,
        &headers,
        area,
        &set.modules,
        Some(Viewing {
            module,
            lessons: &lessons,
            lesson_index,
            exercise: None,
        }),
    )
}

struct Viewing<'a> {
    module: &'a Module,
    lessons: &'a [Lesson],
    lesson_index: usize,
    exercise: Option<ExerciseState<'a>>,
}

fn render_module_page(
    state: &AppState,
    headers: &HeaderMap,
    area: LearningArea,
    modules: &[Module],
    viewing: Option<Viewing<'_>>,
) -> Response {
    let progress = state.progress();
    let completed_modules = progress.completed_modules(area);
    let completed_lessons = viewing
        .as_ref()
        .map(|v| progress.completed_lessons(area, &v.module.id))
        .unwrap_or_default();

    let current = viewing.map(|v| CurrentModule {
        quiz_score: v
            .module
            .quiz
            .as_ref()
            .and_then(|quiz| progress.quiz_score(area, &quiz.id)),
        module: v.module,
        lessons: v.lessons,
        lesson_index: v.lesson_index,
        completed_lessons: &completed_lessons,
        exercise: v.exercise,
    });
    let title = current
        .as_ref()
        .map(|c| c.module.title.clone())
        .unwrap_or_else(|| area.info().title.to_string());

    let body = views::module_viewer::render(&ModulePage {
        area: area.info(),
        modules,
        completed_modules: &completed_modules,
        current,
    });
    let path = format!("/learning/{area}");
    page(state, headers, &title, &path, None, &body)
}

pub async fn complete_lesson(
    State(state): State<AppState>,
    Path((area, module_id, lesson_id)): Path<(String, String, String)>,
) -> Response {
    let (area, set) = match load_area(&state, &area).await {
        Ok(loaded) => loaded,
        Err(redirect) => return redirect,
    };
    let Some(module) = find_module(&set.modules, &module_id) else {
        return Redirect::to(&format!("/learning/{area}")).into_response();
    };
    let Ok(lessons) = state.learning().lessons_for(area, module, set.source).await else {
        return register_redirect();
    };
    let info = area.info();

    match state
        .progress()
        .complete_lesson(area, &module.id, &lessons, &lesson_id)
    {
        LessonAdvance::Next(index) => {
            Redirect::to(&module_href(info, &module.id, Some(index))).into_response()
        }
        LessonAdvance::Incomplete => {
            let done = state.progress().completed_lessons(area, &module.id);
            let open = lessons
                .iter()
                .position(|l| !done.contains(&l.id))
                .unwrap_or_default();
            Redirect::to(&module_href(info, &module.id, Some(open))).into_response()
        }
        LessonAdvance::Unknown => {
            Redirect::to(&module_href(info, &module.id, None)).into_response()
        }
        LessonAdvance::ModuleComplete => {
            if state.progress().complete_module(area, &module.id) {
                info!(%area, module_id = %module.id, "module completed");
            }

            let update = state.api().update_progress(area, &module.id).await;
            if !update.success {
                warn!(
                    %area,
                    module_id = %module.id,
                    error = update.error.as_deref().unwrap_or_default(),
                    "progress update not recorded remotely"
                );
            }

            match neighbors(&set.modules, &module.id).and_then(|n| n.next) {
                Some(next) => redirect_with_flash(
                    &module_href(info, &next.id, None),
                    Flash::success(MODULE_COMPLETED),
                ),
                None => redirect_with_flash(
                    &module_href(info, &module.id, Some(lessons.len().saturating_sub(1))),
                    Flash::success(PATH_COMPLETED),
                ),
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExerciseForm {
    #[serde(default)]
    code: String,
}

pub async fn run_exercise(
    State(state): State<AppState>,
    Path((area, module_id, lesson_id)): Path<(String, String, String)>,
    headers: HeaderMap,
    Form(form): Form<ExerciseForm>,
) -> Response {
    let (area, set) = match load_area(&state, &area).await {
        Ok(loaded) => loaded,
        Err(redirect) => return redirect,
    };
    let Some(module) = find_module(&set.modules, &module_id) else {
        return Redirect::to(&format!("/learning/{area}")).into_response();
    };
    let Ok(lessons) = state.learning().lessons_for(area, module, set.source).await else {
        return register_redirect();
    };
    let Some(lesson_index) = lessons.iter().position(|l| l.id == lesson_id) else {
        return Redirect::to(&module_href(area.info(), &module.id, None)).into_response();
    };

    let run: ExerciseRun = state.runner().run(&form.code).await;
    info!(%area, lesson_id = %lesson_id, all_passed = run.all_passed, "exercise run");

    render_module_page(
        &state,
        &headers,
        area,
        &set.modules,
        Some(Viewing {
            module,
            lessons: &lessons,
            lesson_index,
            exercise: Some(ExerciseState {
                code: &form.code,
                run: Some(&run),
            }),
        }),
    )
}

const ANSWER_PREFIX: &str = "q_";

pub async fn submit_quiz(
    State(state): State<AppState>,
    Path((area, module_id)): Path<(String, String)>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let (area, set) = match load_area(&state, &area).await {
        Ok(loaded) => loaded,
        Err(redirect) => return redirect,
    };
    let Some(module) = find_module(&set.modules, &module_id) else {
        return Redirect::to(&format!("/learning/{area}")).into_response();
    };
    let back = module_href(area.info(), &module.id, None);
    let Some(quiz) = module.quiz.as_ref() else {
        return Redirect::to(&back).into_response();
    };

    let answers: HashMap<String, usize> = fields
        .iter()
        .filter_map(|(key, value)| {
            let question = key.strip_prefix(ANSWER_PREFIX)?;
            let choice = value.trim().parse().ok()?;
            Some((question.to_string(), choice))
        })
        .collect();

    let result = grade(quiz, &answers);
    state.progress().record_quiz(area, &quiz.id, result.score);
    info!(%area, quiz_id = %quiz.id, score = result.score, passed = result.passed, "quiz graded");

    let flash = if result.passed {
        Flash::success(format!(
            "Quiz passed! You scored {}% ({}/{} correct).",
            result.score, result.correct, result.total
        ))
    } else {
        Flash::error(format!(
            "You scored {}% ({}/{} correct). {}% is needed to pass. Try again!",
            result.score, result.correct, result.total, quiz.passing_score
        ))
    };
    redirect_with_flash(&back, flash)
}

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::catalog::LearningArea;
use crate::models::{Lesson, Module, Progress, Quiz};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonAdvance {
    /// Move on to the lesson at this index.
    Next(usize),
    /// Last lesson done and every lesson in the module is complete.
    ModuleComplete,
    /// Last lesson done but earlier ones are still open.
    Incomplete,
    Unknown,
}

#[derive(Debug, Default, Clone)]
struct AreaProgress {
    completed_modules: Vec<String>,
    completed_lessons: HashMap<String, HashSet<String>>,
    current_module: Option<String>,
    quiz_scores: BTreeMap<String, u32>,
    last_accessed_at: Option<DateTime<Utc>>,
}

impl AreaProgress {
    fn touch(&mut self) {
        self.last_accessed_at = Some(Utc::now());
    }
}

#[derive(Debug, Default)]
pub struct ProgressTracker {
    areas: RwLock<HashMap<LearningArea, AreaProgress>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&self, area: LearningArea, module_id: &str) {
        let mut areas = self.areas.write();
        let progress = areas.entry(area).or_default();
        progress.current_module = Some(module_id.to_string());
        progress.touch();
    }

    pub fn complete_lesson(
        &self,
        area: LearningArea,
        module_id: &str,
        lessons: &[Lesson],
        lesson_id: &str,
    ) -> LessonAdvance {
        let Some(index) = lessons.iter().position(|l| l.id == lesson_id) else {
            return LessonAdvance::Unknown;
        };

        let mut areas = self.areas.write();
        let progress = areas.entry(area).or_default();
        progress.touch();
        let done = progress
            .completed_lessons
            .entry(module_id.to_string())
            .or_default();
        done.insert(lesson_id.to_string());

        if index + 1 < lessons.len() {
            LessonAdvance::Next(index + 1)
        } else if lessons.iter().all(|l| done.contains(&l.id)) {
            LessonAdvance::ModuleComplete
        } else {
            LessonAdvance::Incomplete
        }
    }

    pub fn completed_lessons(&self, area: LearningArea, module_id: &str) -> HashSet<String> {
        self.areas
            .read()
            .get(&area)
            .and_then(|p| p.completed_lessons.get(module_id).cloned())
            .unwrap_or_default()
    }

    /// Returns `true` when the module was not already complete.
    pub fn complete_module(&self, area: LearningArea, module_id: &str) -> bool {
        let mut areas = self.areas.write();
        let progress = areas.entry(area).or_default();
        progress.touch();
        if progress.completed_modules.iter().any(|id| id == module_id) {
            return false;
        }
        progress.completed_modules.push(module_id.to_string());
        true
    }

    pub fn completed_modules(&self, area: LearningArea) -> HashSet<String> {
        self.areas
            .read()
            .get(&area)
            .map(|p| p.completed_modules.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn record_quiz(&self, area: LearningArea, quiz_id: &str, score: u32) {
        let mut areas = self.areas.write();
        let progress = areas.entry(area).or_default();
        progress.quiz_scores.insert(quiz_id.to_string(), score);
        progress.touch();
    }

    pub fn quiz_score(&self, area: LearningArea, quiz_id: &str) -> Option<u32> {
        self.areas
            .read()
            .get(&area)
            .and_then(|p| p.quiz_scores.get(quiz_id).copied())
    }

    pub fn snapshot(&self, area: LearningArea, user_id: &str) -> Progress {
        let areas = self.areas.read();
        let progress = areas.get(&area).cloned().unwrap_or_default();
        let last_accessed_at = progress.last_accessed_at.unwrap_or_else(Utc::now);

        Progress {
            user_id: user_id.to_string(),
            learning_area: area,
            completed_modules: progress.completed_modules,
            current_module: progress.current_module,
            quiz_scores: progress.quiz_scores,
            last_accessed_at: last_accessed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// A module is locked until the one before it is complete.
pub fn is_locked(modules: &[Module], index: usize, completed: &HashSet<String>) -> bool {
    index > 0
        && modules
            .get(index - 1)
            .is_some_and(|prev| !completed.contains(&prev.id))
}

pub fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((done.min(total) as f64 / total as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizGrade {
    pub correct: usize,
    pub total: usize,
    pub score: u32,
    pub passed: bool,
}

/// `answers` maps question id to the chosen option index.
pub fn grade(quiz: &Quiz, answers: &HashMap<String, usize>) -> QuizGrade {
    let total = quiz.questions.len();
    let correct = quiz
        .questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_answer))
        .count();
    let score = percent(correct, total);

    QuizGrade {
        correct,
        total,
        score,
        passed: score >= quiz.passing_score,
    }
}

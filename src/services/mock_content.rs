//! Offline content used when the remote API has nothing to offer.

use crate::catalog::LearningArea;
use crate::models::{CodeExample, Lesson, LessonKind, Module};

const INTRO_MARKDOWN: &str = "# Welcome to this module!

This lesson introduces the core concepts you'll be learning. We'll cover:

- Key terminology and definitions
- Why this topic is important
- What you'll be able to do after completing this module

## Getting Started

Let's begin by understanding the fundamentals...";

const ADVANCED_MARKDOWN: &str = "# Advanced Concepts

Now that we've covered the basics, let's dive into more advanced topics...";

const EXAMPLE_CODE: &str = r#"def example_function():
    """This is an example function"""
    return "Hello, Virtual Tech Box!""#;

/// (title, description, minutes) per module, in order.
fn outline(area: LearningArea) -> [(&'static str, &'static str, u32); 3] {
    match area {
        LearningArea::DevOps => [
            (
                "Introduction to DevOps",
                "Learn the fundamentals of DevOps culture and practices",
                30,
            ),
            (
                "Version Control with Git",
                "Master Git for collaborative development",
                45,
            ),
            ("CI/CD Pipelines", "Build automated deployment pipelines", 60),
        ],
        LearningArea::DevSecOps => [
            (
                "Security in the Pipeline",
                "Shift security left and understand the DevSecOps mindset",
                30,
            ),
            (
                "Static and Dynamic Analysis",
                "Run SAST and DAST tools against real applications",
                45,
            ),
            (
                "Container Security",
                "Scan images and harden container runtimes",
                60,
            ),
        ],
        LearningArea::DataEngineering => [
            (
                "Data Engineering Foundations",
                "Understand batch and streaming data architectures",
                30,
            ),
            (
                "Building ETL Pipelines",
                "Extract, transform, and load data with Airflow",
                45,
            ),
            (
                "Processing with Apache Spark",
                "Scale transformations across a cluster",
                60,
            ),
        ],
        LearningArea::FullStack => [
            (
                "Modern Web Fundamentals",
                "HTML, CSS, and TypeScript for application developers",
                30,
            ),
            (
                "Building APIs with Node.js",
                "Design REST endpoints backed by a database",
                45,
            ),
            (
                "Frontends with React",
                "Compose interactive user interfaces from components",
                60,
            ),
        ],
        LearningArea::AiMl => [
            (
                "Machine Learning Basics",
                "Supervised and unsupervised learning in Python",
                30,
            ),
            (
                "Deep Learning with PyTorch",
                "Train neural networks on real datasets",
                45,
            ),
            (
                "Deploying Models",
                "Package, serve, and monitor models in production",
                60,
            ),
        ],
    }
}

pub fn mock_modules(area: LearningArea) -> Vec<Module> {
    outline(area)
        .into_iter()
        .zip(1u32..)
        .map(|((title, description, minutes), order)| Module {
            id: format!("{}-{}", area.as_str(), order),
            title: title.to_string(),
            description: description.to_string(),
            order,
            estimated_minutes: minutes,
            lessons: Vec::new(),
            quiz: None,
        })
        .collect()
}

pub fn mock_lessons(module_id: &str) -> Vec<Lesson> {
    vec![
        Lesson {
            id: format!("{module_id}-lesson-1"),
            title: "Introduction".to_string(),
            kind: LessonKind::Text,
            content: INTRO_MARKDOWN.to_string(),
            code_examples: Vec::new(),
            resources: Vec::new(),
        },
        Lesson {
            id: format!("{module_id}-lesson-2"),
            title: "Hands-on Practice".to_string(),
            kind: LessonKind::Interactive,
            content: "Interactive coding exercise".to_string(),
            code_examples: Vec::new(),
            resources: Vec::new(),
        },
        Lesson {
            id: format!("{module_id}-lesson-3"),
            title: "Advanced Concepts".to_string(),
            kind: LessonKind::Code,
            content: ADVANCED_MARKDOWN.to_string(),
            code_examples: vec![CodeExample {
                language: "python".to_string(),
                code: EXAMPLE_CODE.to_string(),
                title: Some("Example Code".to_string()),
                description: Some("A simple example to demonstrate the concept".to_string()),
            }],
            resources: Vec::new(),
        },
    ]
}

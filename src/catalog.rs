//! The fixed catalog of learning areas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LearningArea {
    #[serde(rename = "devops")]
    DevOps,
    #[serde(rename = "devsecops")]
    DevSecOps,
    #[serde(rename = "data-engineering")]
    DataEngineering,
    #[serde(rename = "fullstack")]
    FullStack,
    #[serde(rename = "ai-ml")]
    AiMl,
}

impl LearningArea {
    pub const ALL: [LearningArea; 5] = [
        LearningArea::DevOps,
        LearningArea::DevSecOps,
        LearningArea::DataEngineering,
        LearningArea::FullStack,
        LearningArea::AiMl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LearningArea::DevOps => "devops",
            LearningArea::DevSecOps => "devsecops",
            LearningArea::DataEngineering => "data-engineering",
            LearningArea::FullStack => "fullstack",
            LearningArea::AiMl => "ai-ml",
        }
    }

    pub fn info(&self) -> &'static LearningAreaInfo {
        let index = Self::ALL
            .iter()
            .position(|area| area == self)
            .unwrap_or_default();
        &LEARNING_AREAS[index]
    }
}

impl fmt::Display for LearningArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown learning area: {0}")]
pub struct UnknownArea(pub String);

impl FromStr for LearningArea {
    type Err = UnknownArea;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|area| area.as_str() == s)
            .ok_or_else(|| UnknownArea(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningAreaInfo {
    pub id: LearningArea,
    pub title: &'static str,
    pub description: &'static str,
    /// Brand palette token, e.g. `vtb-accent-blue`.
    pub color: &'static str,
    pub icon: &'static str,
    pub module_count: u32,
    pub estimated_hours: u32,
    pub skills: &'static [&'static str],
}

pub static LEARNING_AREAS: [LearningAreaInfo; 5] = [
    LearningAreaInfo {
        id: LearningArea::DevOps,
        title: "DevOps",
        description: "Master CI/CD, containerization, orchestration, and infrastructure as code",
        color: "vtb-accent-blue",
        icon: "🚀",
        module_count: 15,
        estimated_hours: 40,
        skills: &["Docker", "Kubernetes", "CI/CD", "Terraform", "AWS/Azure/GCP", "Monitoring"],
    },
    LearningAreaInfo {
        id: LearningArea::DevSecOps,
        title: "DevSecOps",
        description: "Integrate security practices into your DevOps pipeline and workflows",
        color: "vtb-dark-green",
        icon: "🔒",
        module_count: 12,
        estimated_hours: 35,
        skills: &[
            "Security Scanning",
            "SAST/DAST",
            "Container Security",
            "Compliance",
            "Threat Modeling",
        ],
    },
    LearningAreaInfo {
        id: LearningArea::DataEngineering,
        title: "Data Engineering",
        description: "Build scalable data pipelines and work with big data technologies",
        color: "vtb-accent-orange",
        icon: "📊",
        module_count: 18,
        estimated_hours: 50,
        skills: &[
            "Apache Spark",
            "Airflow",
            "Data Lakes",
            "ETL/ELT",
            "SQL/NoSQL",
            "Stream Processing",
        ],
    },
    LearningAreaInfo {
        id: LearningArea::FullStack,
        title: "Full Stack Development",
        description: "Develop end-to-end applications with modern web technologies",
        color: "vtb-accent-red",
        icon: "💻",
        module_count: 20,
        estimated_hours: 60,
        skills: &[
            "React",
            "Node.js",
            "TypeScript",
            "REST/GraphQL",
            "Databases",
            "Cloud Deployment",
        ],
    },
    LearningAreaInfo {
        id: LearningArea::AiMl,
        title: "AI/ML Engineering",
        description: "Explore machine learning, deep learning, and artificial intelligence",
        color: "vtb-accent-pink",
        icon: "🤖",
        module_count: 16,
        estimated_hours: 45,
        skills: &[
            "Python",
            "TensorFlow/PyTorch",
            "MLOps",
            "Computer Vision",
            "NLP",
            "Model Deployment",
        ],
    },
];

pub fn all() -> &'static [LearningAreaInfo] {
    &LEARNING_AREAS
}

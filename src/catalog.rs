//! Static catalogs backing the achievement editor: the closed icon set and
//! the trigger-metric definitions. Both are compile-time data; the stored
//! rows only carry the keys, never the type or unit.

use std::collections::HashMap;
use std::fmt;

use anyhow::Error;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The closed set of icon identifiers an achievement may use. Unknown
/// identifiers are rejected at the boundary instead of silently replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementIcon {
    Award,
    Star,
    Zap,
    BookOpen,
    Target,
    Trophy,
    Flame,
    Crown,
    Lightbulb,
    GraduationCap,
    Rocket,
    Medal,
    Map,
    Flag,
    CheckCircle2,
    Puzzle,
    Timer,
}

impl AchievementIcon {
    pub const ALL: [AchievementIcon; 17] = [
        AchievementIcon::Award,
        AchievementIcon::Star,
        AchievementIcon::Zap,
        AchievementIcon::BookOpen,
        AchievementIcon::Target,
        AchievementIcon::Trophy,
        AchievementIcon::Flame,
        AchievementIcon::Crown,
        AchievementIcon::Lightbulb,
        AchievementIcon::GraduationCap,
        AchievementIcon::Rocket,
        AchievementIcon::Medal,
        AchievementIcon::Map,
        AchievementIcon::Flag,
        AchievementIcon::CheckCircle2,
        AchievementIcon::Puzzle,
        AchievementIcon::Timer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementIcon::Award => "Award",
            AchievementIcon::Star => "Star",
            AchievementIcon::Zap => "Zap",
            AchievementIcon::BookOpen => "BookOpen",
            AchievementIcon::Target => "Target",
            AchievementIcon::Trophy => "Trophy",
            AchievementIcon::Flame => "Flame",
            AchievementIcon::Crown => "Crown",
            AchievementIcon::Lightbulb => "Lightbulb",
            AchievementIcon::GraduationCap => "GraduationCap",
            AchievementIcon::Rocket => "Rocket",
            AchievementIcon::Medal => "Medal",
            AchievementIcon::Map => "Map",
            AchievementIcon::Flag => "Flag",
            AchievementIcon::CheckCircle2 => "CheckCircle2",
            AchievementIcon::Puzzle => "Puzzle",
            AchievementIcon::Timer => "Timer",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|icon| icon.as_str() == s)
            .ok_or_else(|| Error::msg(format!("Unknown icon: {s}")))
    }
}

impl fmt::Display for AchievementIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Numeric,
    Boolean,
}

/// One trigger-metric definition. The target's valid range depends on the
/// kind: boolean metrics admit exactly 0 or 1.
#[derive(Debug, Clone, Serialize)]
pub struct MetricDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub kind: MetricKind,
    pub description: &'static str,
}

pub static METRIC_CATALOG: &[MetricDefinition] = &[
    MetricDefinition {
        key: "study_hours",
        label: "⏱️ Tempo de Estudo",
        unit: "horas",
        kind: MetricKind::Numeric,
        description: "Soma total de horas estudadas na plataforma.",
    },
    MetricDefinition {
        key: "courses_completed",
        label: "📚 Cursos Concluídos",
        unit: "cursos",
        kind: MetricKind::Numeric,
        description: "Quantidade total de cursos com 100% de progresso.",
    },
    MetricDefinition {
        key: "login_streak",
        label: "🔥 Ofensiva (Dias)",
        unit: "dias seguidos",
        kind: MetricKind::Numeric,
        description: "Dias consecutivos acessando a plataforma.",
    },
    MetricDefinition {
        key: "forum_posts",
        label: "💬 Posts no Fórum",
        unit: "posts",
        kind: MetricKind::Numeric,
        description: "Total de interações (tópicos ou respostas) no fórum.",
    },
    MetricDefinition {
        key: "games_played",
        label: "🎮 Jogos Finalizados",
        unit: "partidas",
        kind: MetricKind::Numeric,
        description: "Vezes que o aluno completou um jogo educacional.",
    },
    MetricDefinition {
        key: "onboarding_completed",
        label: "🏁 Completou Onboarding",
        unit: "status",
        kind: MetricKind::Boolean,
        description: "Se o aluno finalizou o tour inicial de boas-vindas.",
    },
    MetricDefinition {
        key: "profile_completed",
        label: "👤 Perfil Completo",
        unit: "status",
        kind: MetricKind::Boolean,
        description: "Se o aluno preencheu todos os dados opcionais do perfil.",
    },
];

static METRICS_BY_KEY: Lazy<HashMap<&'static str, &'static MetricDefinition>> = Lazy::new(|| {
    METRIC_CATALOG
        .iter()
        .map(|metric| (metric.key, metric))
        .collect()
});

pub fn metric(key: &str) -> Option<&'static MetricDefinition> {
    METRICS_BY_KEY.get(key).copied()
}

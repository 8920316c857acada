use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wellcheck_core::models::instrument::InstrumentKind;

use crate::error::ScoringError;
use crate::scoring::{
    check_answers, QuestionId, QuestionInfo, Responses, ResponseScale, ScoreBand, ScoreType,
};
use crate::{Evaluation, Instrument};

/// Self-Compassion Scale (Neff, 2003). 26 items rated 1–5, six subscales.
/// Subscales are item means; the composite re-inverts the three negative
/// subscales so higher always means more self-compassion.
pub struct SelfCompassion {
    pub revision: TableRevision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SelfCompassionSubscale {
    SelfKindness,
    SelfJudgment,
    CommonHumanity,
    Isolation,
    Mindfulness,
    OverIdentification,
}

/// Whether a high subscale value is the healthy end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Polarity {
    Positive,
    Negative,
}

impl SelfCompassionSubscale {
    pub const ALL: [SelfCompassionSubscale; 6] = [
        SelfCompassionSubscale::SelfKindness,
        SelfCompassionSubscale::SelfJudgment,
        SelfCompassionSubscale::CommonHumanity,
        SelfCompassionSubscale::Isolation,
        SelfCompassionSubscale::Mindfulness,
        SelfCompassionSubscale::OverIdentification,
    ];

    pub fn id(self) -> &'static str {
        match self {
            SelfCompassionSubscale::SelfKindness => "self_kindness",
            SelfCompassionSubscale::SelfJudgment => "self_judgment",
            SelfCompassionSubscale::CommonHumanity => "common_humanity",
            SelfCompassionSubscale::Isolation => "isolation",
            SelfCompassionSubscale::Mindfulness => "mindfulness",
            SelfCompassionSubscale::OverIdentification => "over_identification",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SelfCompassionSubscale::SelfKindness => "Self-Kindness",
            SelfCompassionSubscale::SelfJudgment => "Self-Judgment",
            SelfCompassionSubscale::CommonHumanity => "Common Humanity",
            SelfCompassionSubscale::Isolation => "Isolation",
            SelfCompassionSubscale::Mindfulness => "Mindfulness",
            SelfCompassionSubscale::OverIdentification => "Over-Identification",
        }
    }

    pub fn polarity(self) -> Polarity {
        match self {
            SelfCompassionSubscale::SelfKindness
            | SelfCompassionSubscale::CommonHumanity
            | SelfCompassionSubscale::Mindfulness => Polarity::Positive,
            SelfCompassionSubscale::SelfJudgment
            | SelfCompassionSubscale::Isolation
            | SelfCompassionSubscale::OverIdentification => Polarity::Negative,
        }
    }

    fn index(self) -> usize {
        match self {
            SelfCompassionSubscale::SelfKindness => 0,
            SelfCompassionSubscale::SelfJudgment => 1,
            SelfCompassionSubscale::CommonHumanity => 2,
            SelfCompassionSubscale::Isolation => 3,
            SelfCompassionSubscale::Mindfulness => 4,
            SelfCompassionSubscale::OverIdentification => 5,
        }
    }
}

/// Interpretation band shared by the composite and every subscale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CompassionLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl CompassionLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 4.0 {
            CompassionLevel::VeryHigh
        } else if score >= 3.5 {
            CompassionLevel::High
        } else if score >= 3.0 {
            CompassionLevel::Moderate
        } else if score >= 2.5 {
            CompassionLevel::Low
        } else {
            CompassionLevel::VeryLow
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CompassionLevel::VeryLow => "Very Low",
            CompassionLevel::Low => "Low",
            CompassionLevel::Moderate => "Moderate",
            CompassionLevel::High => "High",
            CompassionLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for CompassionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which copy of the item table to score against.
///
/// The two copies disagree on items 1 and 13. `Original` leaves item 1
/// unscored and counts item 13 towards over-identification; `Revised` counts
/// item 1 as self-kindness and item 13 as mindfulness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TableRevision {
    #[default]
    Original,
    Revised,
}

impl FromStr for TableRevision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "original" => Ok(TableRevision::Original),
            "revised" => Ok(TableRevision::Revised),
            other => Err(format!(
                "unknown self-compassion table revision '{other}' (expected 'original' or 'revised')"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfCompassionItem {
    pub id: QuestionId,
    pub text: &'static str,
    /// `None` marks an item that is administered but never scored.
    pub subscale: Option<SelfCompassionSubscale>,
    pub reversed: bool,
}

const fn item(
    id: QuestionId,
    text: &'static str,
    subscale: Option<SelfCompassionSubscale>,
    reversed: bool,
) -> SelfCompassionItem {
    SelfCompassionItem {
        id,
        text,
        subscale,
        reversed,
    }
}

use SelfCompassionSubscale::{
    CommonHumanity, Isolation, Mindfulness, OverIdentification, SelfJudgment, SelfKindness,
};

static ORIGINAL_ITEMS: [SelfCompassionItem; 26] = [
    item(1, "Soy tolerante con mis propios defectos y limitaciones.", None, false),
    item(2, "Cuando algo doloroso me pasa, trato de mantener mis emociones en equilibrio.", Some(Mindfulness), false),
    item(3, "Cuando me siento fracasado, tiendo a ser duro conmigo mismo.", Some(SelfJudgment), true),
    item(4, "Cuando enfrento situaciones difíciles, me recuerdo que muchas personas también pasan por lo mismo.", Some(CommonHumanity), false),
    item(5, "Tiendo a obsesionarme y a fijarme demasiado en cosas negativas que me han ocurrido.", Some(OverIdentification), true),
    item(6, "Cuando me siento inadecuado de alguna manera, trato de ver mis defectos con amabilidad.", Some(SelfKindness), false),
    item(7, "Cuando experimento emociones negativas, trato de mantener una perspectiva equilibrada.", Some(Mindfulness), false),
    item(8, "Cuando pienso en mis errores, tiendo a sentirme aislado del resto del mundo.", Some(Isolation), true),
    item(9, "Cuando estoy sufriendo, tiendo a culpabilizarme a mí mismo por todo.", Some(SelfJudgment), true),
    item(10, "Cuando tengo dificultades, sé que no estoy solo en mi experiencia.", Some(CommonHumanity), false),
    item(11, "Cuando me siento emocionalmente mal, trato de tomar distancia con mis emociones para no dejarme atrapar por ellas.", Some(Mindfulness), false),
    item(12, "Cuando me siento mal conmigo mismo, tiendo a sentirme solo en mis fallas.", Some(Isolation), true),
    item(13, "Cuando me enfrento a un fallo personal, trato de mantenerme calmado.", Some(OverIdentification), false),
    item(14, "Cuando algo doloroso me sucede, tiendo a pensar que esto es solo mi problema.", Some(Isolation), true),
    item(15, "Trato de ser comprensivo con aquellos aspectos de mí mismo que no me gustan.", Some(SelfKindness), false),
    item(16, "Cuando me siento deprimido por algo que he hecho, tiendo a fijarme solo en mis errores.", Some(SelfJudgment), true),
    item(17, "Cuando tengo dificultades, me doy cuenta de que lo que estoy sintiendo forma parte de la experiencia humana.", Some(CommonHumanity), false),
    item(18, "Cuando me siento mal emocionalmente, me ayuda ver mis sentimientos con claridad.", Some(Mindfulness), false),
    item(19, "Cuando me siento frustrado, tiendo a pensar que la mayoría de la gente está probablemente más feliz que yo.", Some(Isolation), true),
    item(20, "Cuando cometo errores, tiendo a ser muy crítico conmigo mismo.", Some(SelfJudgment), true),
    item(21, "Trato de mantener una actitud equilibrada frente a cosas que me molestan.", Some(Mindfulness), false),
    item(22, "Cuando algo me duele, me esfuerzo por cuidarme de la mejor manera.", Some(SelfKindness), false),
    item(23, "Cuando me siento mal conmigo mismo, pienso que los demás probablemente están llevando una vida mejor que yo.", Some(Isolation), true),
    item(24, "Cuando las cosas van mal, me esfuerzo por ver los aspectos positivos.", Some(SelfKindness), false),
    item(25, "Cuando tengo emociones difíciles, me permito sentirlas sin resistirme.", Some(Mindfulness), false),
    item(26, "Cuando fallo en algo importante para mí, intento tratarme con comprensión en lugar de juzgarme severamente.", Some(SelfKindness), false),
];

static REVISED_ITEMS: LazyLock<Vec<SelfCompassionItem>> = LazyLock::new(|| {
    ORIGINAL_ITEMS
        .iter()
        .map(|original| match original.id {
            1 => SelfCompassionItem {
                subscale: Some(SelfKindness),
                ..*original
            },
            13 => SelfCompassionItem {
                subscale: Some(Mindfulness),
                ..*original
            },
            _ => *original,
        })
        .collect()
});

/// The item table for a revision, in administration order.
pub fn items(revision: TableRevision) -> &'static [SelfCompassionItem] {
    match revision {
        TableRevision::Original => &ORIGINAL_ITEMS,
        TableRevision::Revised => &REVISED_ITEMS,
    }
}

static SCALE: LazyLock<ResponseScale> = LazyLock::new(|| ResponseScale {
    min: 1,
    max: 5,
    labels: ["Casi nunca", "Rara vez", "A veces", "Frecuentemente", "Casi siempre"]
        .map(String::from)
        .to_vec(),
});

pub fn scale() -> &'static ResponseScale {
    &SCALE
}

static ORIGINAL_QUESTIONS: LazyLock<Vec<QuestionInfo>> =
    LazyLock::new(|| question_info(items(TableRevision::Original)));
static REVISED_QUESTIONS: LazyLock<Vec<QuestionInfo>> =
    LazyLock::new(|| question_info(items(TableRevision::Revised)));

fn question_info(items: &[SelfCompassionItem]) -> Vec<QuestionInfo> {
    items
        .iter()
        .map(|item| QuestionInfo {
            id: item.id,
            text: item.text.to_string(),
            subscale_id: item.subscale.map(|s| s.id().to_string()),
            reversed: item.reversed,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelfCompassionResults {
    pub self_kindness: f64,
    pub self_judgment: f64,
    pub common_humanity: f64,
    pub isolation: f64,
    pub mindfulness: f64,
    pub over_identification: f64,
    pub composite: f64,
}

impl SelfCompassionResults {
    pub fn subscale(&self, subscale: SelfCompassionSubscale) -> f64 {
        match subscale {
            SelfCompassionSubscale::SelfKindness => self.self_kindness,
            SelfCompassionSubscale::SelfJudgment => self.self_judgment,
            SelfCompassionSubscale::CommonHumanity => self.common_humanity,
            SelfCompassionSubscale::Isolation => self.isolation,
            SelfCompassionSubscale::Mindfulness => self.mindfulness,
            SelfCompassionSubscale::OverIdentification => self.over_identification,
        }
    }

    pub fn composite_level(&self) -> CompassionLevel {
        CompassionLevel::from_score(self.composite)
    }

    /// Band of the stored subscale value. For negative subscales a high
    /// band means a worse outcome.
    pub fn level(&self, subscale: SelfCompassionSubscale) -> CompassionLevel {
        CompassionLevel::from_score(self.subscale(subscale))
    }

    /// Band with negative subscales mirrored, so a high band is always the
    /// healthy end.
    pub fn favourable_level(&self, subscale: SelfCompassionSubscale) -> CompassionLevel {
        let value = self.subscale(subscale);
        match subscale.polarity() {
            Polarity::Positive => CompassionLevel::from_score(value),
            Polarity::Negative => CompassionLevel::from_score(6.0 - value),
        }
    }

    pub fn bands(&self) -> Vec<ScoreBand> {
        let mut bands = vec![ScoreBand {
            id: "composite".to_string(),
            name: "Self-Compassion".to_string(),
            score_type: ScoreType::Mean,
            value: self.composite,
            label: self.composite_level().to_string(),
            lower_is_better: false,
        }];
        bands.extend(SelfCompassionSubscale::ALL.iter().map(|&subscale| ScoreBand {
            id: subscale.id().to_string(),
            name: subscale.name().to_string(),
            score_type: ScoreType::Mean,
            value: self.subscale(subscale),
            label: self.level(subscale).to_string(),
            lower_is_better: subscale.polarity() == Polarity::Negative,
        }));
        bands
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    sum: u32,
    count: u32,
}

/// Score a complete answer set against an item table.
pub fn score_items(
    items: &[SelfCompassionItem],
    answers: &Responses,
) -> Result<SelfCompassionResults, ScoringError> {
    let instrument = InstrumentKind::SelfCompassion;
    let ids: Vec<QuestionId> = items.iter().map(|item| item.id).collect();
    check_answers(instrument, &ids, scale(), answers)?;

    let mut tallies = [Tally::default(); 6];
    for item in items {
        let Some(subscale) = item.subscale else {
            continue;
        };
        let Some(&value) = answers.get(&item.id) else {
            continue;
        };
        let score = if item.reversed {
            scale().reverse(value)
        } else {
            value
        };
        let tally = &mut tallies[subscale.index()];
        tally.sum += u32::from(score);
        tally.count += 1;
    }

    let mean = |subscale: SelfCompassionSubscale| -> Result<f64, ScoringError> {
        let tally = tallies[subscale.index()];
        if tally.count == 0 {
            return Err(ScoringError::InvalidConfiguration {
                instrument,
                subscale: subscale.id(),
            });
        }
        Ok(f64::from(tally.sum) / f64::from(tally.count))
    };

    let self_kindness = mean(SelfKindness)?;
    let self_judgment = mean(SelfJudgment)?;
    let common_humanity = mean(CommonHumanity)?;
    let isolation = mean(Isolation)?;
    let mindfulness = mean(Mindfulness)?;
    let over_identification = mean(OverIdentification)?;

    let composite = (self_kindness
        + common_humanity
        + mindfulness
        + (6.0 - self_judgment)
        + (6.0 - isolation)
        + (6.0 - over_identification))
        / 6.0;

    Ok(SelfCompassionResults {
        self_kindness,
        self_judgment,
        common_humanity,
        isolation,
        mindfulness,
        over_identification,
        composite,
    })
}

impl Instrument for SelfCompassion {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::SelfCompassion
    }

    fn name(&self) -> &str {
        "Self-Compassion Scale"
    }

    fn scale(&self) -> &ResponseScale {
        scale()
    }

    fn questions(&self) -> &[QuestionInfo] {
        match self.revision {
            TableRevision::Original => &ORIGINAL_QUESTIONS,
            TableRevision::Revised => &REVISED_QUESTIONS,
        }
    }

    fn evaluate(&self, answers: &Responses) -> Result<Evaluation, ScoringError> {
        score_items(items(self.revision), answers).map(Evaluation::SelfCompassion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_table_has_one_unscored_item() {
        let unscored: Vec<_> = items(TableRevision::Original)
            .iter()
            .filter(|item| item.subscale.is_none())
            .map(|item| item.id)
            .collect();
        assert_eq!(unscored, vec![1]);
    }

    #[test]
    fn revised_table_scores_every_item() {
        let revised = items(TableRevision::Revised);
        assert_eq!(revised.len(), 26);
        assert!(revised.iter().all(|item| item.subscale.is_some()));
        assert_eq!(revised[0].subscale, Some(SelfKindness));
        assert_eq!(revised[12].subscale, Some(Mindfulness));
    }

    #[test]
    fn revisions_differ_only_in_items_one_and_thirteen() {
        let changed: Vec<_> = items(TableRevision::Original)
            .iter()
            .zip(items(TableRevision::Revised))
            .filter(|(a, b)| a != b)
            .map(|(a, _)| a.id)
            .collect();
        assert_eq!(changed, vec![1, 13]);
    }

    #[test]
    fn every_subscale_is_populated_in_both_revisions() {
        for revision in [TableRevision::Original, TableRevision::Revised] {
            for subscale in SelfCompassionSubscale::ALL {
                assert!(
                    items(revision).iter().any(|item| item.subscale == Some(subscale)),
                    "{revision:?} has no {subscale:?} item"
                );
            }
        }
    }

    #[test]
    fn level_thresholds_are_inclusive() {
        assert_eq!(CompassionLevel::from_score(4.0), CompassionLevel::VeryHigh);
        assert_eq!(CompassionLevel::from_score(3.999), CompassionLevel::High);
        assert_eq!(CompassionLevel::from_score(3.5), CompassionLevel::High);
        assert_eq!(CompassionLevel::from_score(3.0), CompassionLevel::Moderate);
        assert_eq!(CompassionLevel::from_score(2.5), CompassionLevel::Low);
        assert_eq!(CompassionLevel::from_score(2.499), CompassionLevel::VeryLow);
        assert_eq!(CompassionLevel::from_score(1.0), CompassionLevel::VeryLow);
    }

    #[test]
    fn revision_parses_case_insensitively() {
        assert_eq!("Revised".parse(), Ok(TableRevision::Revised));
        assert_eq!(" original ".parse(), Ok(TableRevision::Original));
        assert!("v2".parse::<TableRevision>().is_err());
    }
}

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use wellcheck_core::models::instrument::InstrumentKind;

use crate::error::ScoringError;
use crate::scoring::{
    check_answers, QuestionId, QuestionInfo, Responses, ResponseScale, ScoreBand, ScoreType,
};
use crate::{Evaluation, Instrument};

/// DASS-21: Depression Anxiety Stress Scales, short form.
/// 21 items rated 0–3. Subscale sums are doubled so they can be read
/// against the DASS-42 severity cutoffs.
pub struct Dass21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DassSubscale {
    Depression,
    Anxiety,
    Stress,
}

impl DassSubscale {
    pub const ALL: [DassSubscale; 3] = [
        DassSubscale::Depression,
        DassSubscale::Anxiety,
        DassSubscale::Stress,
    ];

    pub fn id(self) -> &'static str {
        match self {
            DassSubscale::Depression => "depression",
            DassSubscale::Anxiety => "anxiety",
            DassSubscale::Stress => "stress",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DassSubscale::Depression => "Depression",
            DassSubscale::Anxiety => "Anxiety",
            DassSubscale::Stress => "Stress",
        }
    }

    pub fn cutoffs(self) -> Cutoffs {
        match self {
            DassSubscale::Depression => Cutoffs {
                normal: 9,
                mild: 13,
                moderate: 20,
                severe: 27,
            },
            DassSubscale::Anxiety => Cutoffs {
                normal: 7,
                mild: 9,
                moderate: 14,
                severe: 19,
            },
            DassSubscale::Stress => Cutoffs {
                normal: 14,
                mild: 18,
                moderate: 25,
                severe: 33,
            },
        }
    }
}

/// Inclusive upper bounds of the first four bands. Anything above
/// `severe` is extremely severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cutoffs {
    pub normal: u32,
    pub mild: u32,
    pub moderate: u32,
    pub severe: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DassSeverity {
    Normal,
    Mild,
    Moderate,
    Severe,
    ExtremelySevere,
}

impl DassSeverity {
    pub fn classify(score: u32, cutoffs: Cutoffs) -> Self {
        if score <= cutoffs.normal {
            DassSeverity::Normal
        } else if score <= cutoffs.mild {
            DassSeverity::Mild
        } else if score <= cutoffs.moderate {
            DassSeverity::Moderate
        } else if score <= cutoffs.severe {
            DassSeverity::Severe
        } else {
            DassSeverity::ExtremelySevere
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DassSeverity::Normal => "Normal",
            DassSeverity::Mild => "Mild",
            DassSeverity::Moderate => "Moderate",
            DassSeverity::Severe => "Severe",
            DassSeverity::ExtremelySevere => "Extremely severe",
        }
    }
}

impl fmt::Display for DassSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DassItem {
    pub id: QuestionId,
    pub text: &'static str,
    pub subscale: DassSubscale,
}

const fn item(id: QuestionId, text: &'static str, subscale: DassSubscale) -> DassItem {
    DassItem { id, text, subscale }
}

pub static ITEMS: [DassItem; 21] = [
    item(1, "He tenido dificultad para relajarme", DassSubscale::Stress),
    item(2, "He sentido sequedad en la boca", DassSubscale::Anxiety),
    item(3, "No he podido sentir ningún entusiasmo por nada", DassSubscale::Depression),
    item(4, "He tenido dificultad para respirar (sin haber realizado esfuerzo físico)", DassSubscale::Anxiety),
    item(5, "He encontrado difícil iniciar cosas", DassSubscale::Depression),
    item(6, "He tendido a reaccionar de forma exagerada a las situaciones", DassSubscale::Stress),
    item(7, "He sentido temblor (por ejemplo, en las manos)", DassSubscale::Anxiety),
    item(8, "He sentido que estoy triste o deprimido", DassSubscale::Depression),
    item(9, "He sentido que me resultaba difícil relajarme", DassSubscale::Stress),
    item(10, "He tenido miedo sin razón aparente", DassSubscale::Anxiety),
    item(11, "He sentido que la vida no tiene sentido", DassSubscale::Depression),
    item(12, "He sentido que estaba inquieto/a", DassSubscale::Stress),
    item(13, "He tenido dificultad para tragar", DassSubscale::Anxiety),
    item(14, "No podía experimentar ningún sentimiento positivo", DassSubscale::Depression),
    item(15, "He sentido que estaba a punto de entrar en pánico", DassSubscale::Anxiety),
    item(16, "He sentido que no valía nada", DassSubscale::Depression),
    item(17, "He estado consciente de la acción de mi corazón sin haber hecho esfuerzo físico (por ejemplo, aumento del ritmo cardíaco, salto del corazón)", DassSubscale::Anxiety),
    item(18, "He sentido que estaba muy irritable", DassSubscale::Stress),
    item(19, "He sentido que tenía una actitud de indiferencia hacia todo", DassSubscale::Depression),
    item(20, "Me he sentido cercano a entrar en pánico", DassSubscale::Anxiety),
    item(21, "He sentido que era difícil calmarme", DassSubscale::Stress),
];

static SCALE: LazyLock<ResponseScale> = LazyLock::new(|| ResponseScale {
    min: 0,
    max: 3,
    labels: [
        "No me ha pasado nada de esto",
        "Me ha pasado en alguna medida o en ocasiones",
        "Me ha pasado en una medida considerable o muchas veces",
        "Me ha pasado mucho o casi siempre",
    ]
    .map(String::from)
    .to_vec(),
});

pub fn scale() -> &'static ResponseScale {
    &SCALE
}

static QUESTIONS: LazyLock<Vec<QuestionInfo>> = LazyLock::new(|| {
    ITEMS
        .iter()
        .map(|item| QuestionInfo {
            id: item.id,
            text: item.text.to_string(),
            subscale_id: Some(item.subscale.id().to_string()),
            reversed: false,
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DassScore {
    /// Doubled raw sum.
    pub score: u32,
    pub severity: DassSeverity,
}

impl DassScore {
    fn new(subscale: DassSubscale, raw_sum: u32) -> Self {
        let score = raw_sum * 2;
        Self {
            score,
            severity: DassSeverity::classify(score, subscale.cutoffs()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DassResults {
    pub depression: DassScore,
    pub anxiety: DassScore,
    pub stress: DassScore,
}

impl DassResults {
    pub fn subscale(&self, subscale: DassSubscale) -> DassScore {
        match subscale {
            DassSubscale::Depression => self.depression,
            DassSubscale::Anxiety => self.anxiety,
            DassSubscale::Stress => self.stress,
        }
    }

    /// True when any subscale is above the normal band, in which case the
    /// respondent should be pointed towards professional support.
    pub fn any_elevated(&self) -> bool {
        DassSubscale::ALL
            .iter()
            .any(|&s| self.subscale(s).severity > DassSeverity::Normal)
    }

    pub fn bands(&self) -> Vec<ScoreBand> {
        DassSubscale::ALL
            .iter()
            .map(|&subscale| {
                let entry = self.subscale(subscale);
                ScoreBand {
                    id: subscale.id().to_string(),
                    name: subscale.name().to_string(),
                    score_type: ScoreType::DoubledSum,
                    value: f64::from(entry.score),
                    label: entry.severity.to_string(),
                    lower_is_better: true,
                }
            })
            .collect()
    }
}

/// Score a complete answer set against an item table.
pub fn score_items(items: &[DassItem], answers: &Responses) -> Result<DassResults, ScoringError> {
    let instrument = InstrumentKind::Dass21;
    let ids: Vec<QuestionId> = items.iter().map(|item| item.id).collect();
    check_answers(instrument, &ids, scale(), answers)?;

    let mut sums = [0u32; 3];
    let mut counts = [0u32; 3];
    for item in items {
        let Some(&value) = answers.get(&item.id) else {
            continue;
        };
        let slot = match item.subscale {
            DassSubscale::Depression => 0,
            DassSubscale::Anxiety => 1,
            DassSubscale::Stress => 2,
        };
        sums[slot] += u32::from(value);
        counts[slot] += 1;
    }

    for (slot, subscale) in DassSubscale::ALL.iter().enumerate() {
        if counts[slot] == 0 {
            return Err(ScoringError::InvalidConfiguration {
                instrument,
                subscale: subscale.id(),
            });
        }
    }

    Ok(DassResults {
        depression: DassScore::new(DassSubscale::Depression, sums[0]),
        anxiety: DassScore::new(DassSubscale::Anxiety, sums[1]),
        stress: DassScore::new(DassSubscale::Stress, sums[2]),
    })
}

impl Instrument for Dass21 {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Dass21
    }

    fn name(&self) -> &str {
        "DASS-21"
    }

    fn scale(&self) -> &ResponseScale {
        scale()
    }

    fn questions(&self) -> &[QuestionInfo] {
        &QUESTIONS
    }

    fn evaluate(&self, answers: &Responses) -> Result<Evaluation, ScoringError> {
        score_items(&ITEMS, answers).map(Evaluation::Dass21)
    }
}

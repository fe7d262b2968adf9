use once_cell::sync::Lazy;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub score: i32,
    pub explanations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "Raw AI template")]
    RawAiTemplate,
    #[serde(rename = "Confirmed AI")]
    ConfirmedAi,
    #[serde(rename = "Heavy AI edit")]
    HeavyAiEdit,
    #[serde(rename = "AI-assisted")]
    AiAssisted,
    #[serde(rename = "Natural writing")]
    NaturalWriting,
    #[serde(rename = "Pure human")]
    PureHuman,
}

impl Verdict {
    /// Map a score to its tier, highest threshold first.
    pub fn for_score(score: i32) -> Self {
        if score >= HP.verdict_raw_min {
            Verdict::RawAiTemplate
        } else if score >= HP.verdict_confirmed_min {
            Verdict::ConfirmedAi
        } else if score >= HP.verdict_heavy_min {
            Verdict::HeavyAiEdit
        } else if score >= HP.verdict_assisted_min {
            Verdict::AiAssisted
        } else if score > 0 {
            Verdict::NaturalWriting
        } else {
            Verdict::PureHuman
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::RawAiTemplate => "Raw AI template",
            Verdict::ConfirmedAi => "Confirmed AI",
            Verdict::HeavyAiEdit => "Heavy AI edit",
            Verdict::AiAssisted => "AI-assisted",
            Verdict::NaturalWriting => "Natural writing",
            Verdict::PureHuman => "Pure human",
        }
    }
}

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

struct Hyperparameters {
    emoji_combo_min: usize,
    emoji_combo_base: i32,
    emoji_combo_step: i32,
    emoji_layout_newline_min: usize,
    emoji_layout_bonus: i32,
    scattered_emoji_weight: i32,
    combo_min: usize,
    combo_base: i32,
    combo_step: i32,
    combo_light_weight: i32,
    human_word_bonus: i32,
    rhythm_min_paragraphs: usize,
    rhythm_min_chars: usize,
    rhythm_uniform_ratio: f64,
    rhythm_uniform_delta: i32,
    rhythm_variance_delta: i32,
    verdict_raw_min: i32,
    verdict_confirmed_min: i32,
    verdict_heavy_min: i32,
    verdict_assisted_min: i32,
}

static HP: Hyperparameters = Hyperparameters {
    emoji_combo_min: 3,
    emoji_combo_base: 50,
    emoji_combo_step: 8,
    emoji_layout_newline_min: 5,
    emoji_layout_bonus: 25,
    scattered_emoji_weight: 2,
    combo_min: 3,
    combo_base: 50,
    combo_step: 12,
    combo_light_weight: 5,
    human_word_bonus: 10,
    rhythm_min_paragraphs: 3,
    rhythm_min_chars: 5,
    rhythm_uniform_ratio: 0.3,
    rhythm_uniform_delta: 35,
    rhythm_variance_delta: -15,
    verdict_raw_min: 90,
    verdict_confirmed_min: 60,
    verdict_heavy_min: 40,
    verdict_assisted_min: 20,
};

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

/// A named keyword list. Each distinct keyword found in the text contributes
/// `weight` once, regardless of how often it repeats.
#[derive(Debug, Clone)]
pub struct RuleGroup {
    pub name: &'static str,
    pub keywords: Vec<&'static str>,
    pub weight: i32,
}

/// Colloquial words and sentence-final particles that read as organic
/// human phrasing.
#[derive(Debug, Clone)]
pub struct HumanFeatureGroup {
    pub name: &'static str,
    pub words: Vec<&'static str>,
}

/// A rhetorical template: a head literal, optionally followed by a tail
/// literal after an arbitrary-length gap. The gap spans line breaks; only
/// match/no-match feeds the score.
#[derive(Debug, Clone)]
pub struct ComboPattern {
    head: &'static str,
    tail: Option<&'static str>,
}

impl ComboPattern {
    pub const fn exact(head: &'static str) -> Self {
        Self { head, tail: None }
    }

    pub const fn gapped(head: &'static str, tail: &'static str) -> Self {
        Self {
            head,
            tail: Some(tail),
        }
    }

    /// The tail must start at or after the end of the head's first
    /// occurrence.
    pub fn matches(&self, text: &str) -> bool {
        let Some(at) = text.find(self.head) else {
            return false;
        };
        match self.tail {
            None => true,
            Some(tail) => text[at + self.head.len()..].contains(tail),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ruleset {
    pub lexical: Vec<RuleGroup>,
    pub emojis: Vec<&'static str>,
    pub combos: Vec<ComboPattern>,
    pub human: Vec<HumanFeatureGroup>,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self {
            lexical: vec![
                RuleGroup {
                    name: "formal connectives",
                    keywords: vec!["此外", "然而", "總之", "不僅如此", "值得注意的是", "除此之外"],
                    weight: 15,
                },
                RuleGroup {
                    name: "robotic tone",
                    keywords: vec![
                        "作為一個",
                        "這不僅僅是",
                        "讓我們來看看",
                        "在當今社會",
                        "總結來說",
                        "希望這對你有幫助",
                    ],
                    weight: 25,
                },
            ],
            emojis: vec![
                "🏮", "💬", "📱", "💡", "✨", "🔥", "🧧", "🚀", "✅", "⚠️", "🏸", "📌", "🚩",
                "📝", "📊",
            ],
            combos: vec![
                ComboPattern::exact("有沒有發現"),
                ComboPattern::exact("這時候最需要的"),
                ComboPattern::gapped("不需要", "也不用"),
                ComboPattern::gapped("不用", "也不用"),
                ComboPattern::exact("就是單純想"),
                ComboPattern::exact("你可能會說"),
                ComboPattern::exact("你可能會覺得"),
                ComboPattern::exact("對，但是"),
                ComboPattern::exact("沒錯"),
                ComboPattern::exact("換個方式"),
                ComboPattern::gapped("我們在", "等你"),
                ComboPattern::gapped("我們在", "見"),
                ComboPattern::exact("期待您的"),
                ComboPattern::exact("其實很"),
                ComboPattern::gapped("不只是", "更是"),
            ],
            human: vec![
                HumanFeatureGroup {
                    name: "colloquialisms",
                    words: vec![
                        "傻眼",
                        "扯",
                        "超強",
                        "拜託",
                        "真的很累",
                        "超爽",
                        "鳥事",
                        "真的差很多",
                        "沒在騙",
                    ],
                },
                HumanFeatureGroup {
                    name: "particles",
                    words: vec!["齁", "嘛", "啦", "囉", "呀", "吧", "呢", "欸", "喔"],
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sample standard deviation. Callers must supply at least two values.
fn sample_stdev(values: &[f64], mean: f64) -> f64 {
    let variance =
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn quote_list(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| format!("'{w}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Scan passes
// ---------------------------------------------------------------------------

struct PassOutput {
    delta: i32,
    explanations: Vec<String>,
}

impl PassOutput {
    fn empty() -> Self {
        Self {
            delta: 0,
            explanations: Vec::new(),
        }
    }
}

pub struct Detector {
    rules: Ruleset,
}

impl Detector {
    pub fn new(rules: Ruleset) -> Self {
        Self { rules }
    }

    /// Run all five passes over `text` and return the summed score with one
    /// explanation line per triggered rule group, in pass order.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let mut score = 0;
        let mut explanations = Vec::new();

        for pass in [
            self.scan_emoji_layout(text),
            self.scan_lexical_groups(text),
            self.scan_rhetorical_combos(text),
            self.scan_human_markers(text),
            self.scan_paragraph_rhythm(text),
        ] {
            score += pass.delta;
            explanations.extend(pass.explanations);
        }

        AnalysisResult {
            score,
            explanations,
        }
    }

    fn scan_emoji_layout(&self, text: &str) -> PassOutput {
        let mut out = PassOutput::empty();
        let found = self
            .rules
            .emojis
            .iter()
            .filter(|e| text.contains(**e))
            .count();

        if found >= HP.emoji_combo_min {
            let mut combo =
                HP.emoji_combo_base + HP.emoji_combo_step * (found - HP.emoji_combo_min) as i32;
            // Many line breaks alongside dense icons reads as an icon-led
            // listicle layout.
            if text.matches('\n').count() >= HP.emoji_layout_newline_min {
                combo += HP.emoji_layout_bonus;
                out.explanations.push(format!(
                    "structured layout: dense icons split across heavy line breaks (+{})",
                    HP.emoji_layout_bonus
                ));
            }
            out.delta += combo;
            out.explanations.push(format!(
                "functional emoji combo: {found} distinct listicle icons (+{combo})"
            ));
        } else if found > 0 {
            let delta = HP.scattered_emoji_weight * found as i32;
            out.delta += delta;
            out.explanations.push(format!(
                "scattered icons: only {found} emoji markers (+{delta})"
            ));
        }
        out
    }

    fn scan_lexical_groups(&self, text: &str) -> PassOutput {
        let mut out = PassOutput::empty();
        for group in &self.rules.lexical {
            let found: Vec<&str> = group
                .keywords
                .iter()
                .copied()
                .filter(|w| text.contains(w))
                .collect();
            if found.is_empty() {
                continue;
            }
            let delta = found.len() as i32 * group.weight;
            out.delta += delta;
            out.explanations
                .push(format!("{}: {} (+{delta})", group.name, quote_list(&found)));
        }
        out
    }

    fn scan_rhetorical_combos(&self, text: &str) -> PassOutput {
        let mut out = PassOutput::empty();
        let combo_count = self
            .rules
            .combos
            .iter()
            .filter(|p| p.matches(text))
            .count();

        if combo_count >= HP.combo_min {
            let delta = HP.combo_base + HP.combo_step * (combo_count - HP.combo_min) as i32;
            out.delta += delta;
            out.explanations.push(format!(
                "high-order rhetorical combo: {combo_count} patterns stacked together (+{delta})"
            ));
        } else if combo_count > 0 {
            let delta = HP.combo_light_weight * combo_count as i32;
            out.delta += delta;
            out.explanations.push(format!(
                "normal rhetorical usage: {combo_count} patterns (+{delta})"
            ));
        }
        out
    }

    fn scan_human_markers(&self, text: &str) -> PassOutput {
        let mut out = PassOutput::empty();
        let mut human_bonus = 0;
        for group in &self.rules.human {
            let found: Vec<&str> = group
                .words
                .iter()
                .copied()
                .filter(|w| text.contains(w))
                .collect();
            if found.is_empty() {
                continue;
            }
            let bonus = found.len() as i32 * HP.human_word_bonus;
            human_bonus += bonus;
            out.explanations.push(format!(
                "human markers ({}): {} (-{bonus})",
                group.name,
                quote_list(&found)
            ));
        }
        out.delta -= human_bonus;
        out
    }

    fn scan_paragraph_rhythm(&self, text: &str) -> PassOutput {
        let mut out = PassOutput::empty();
        let lengths: Vec<f64> = text
            .split('\n')
            .filter_map(|p| {
                let n = p.trim().chars().count();
                (n > HP.rhythm_min_chars).then_some(n as f64)
            })
            .collect();

        // Sample stdev is undefined below two data points; the paragraph
        // minimum keeps this pass well clear of that.
        if lengths.len() < HP.rhythm_min_paragraphs {
            return out;
        }

        let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
        let stdev = sample_stdev(&lengths, mean);

        if stdev < mean * HP.rhythm_uniform_ratio {
            out.delta += HP.rhythm_uniform_delta;
            out.explanations.push(format!(
                "paragraph rhythm too uniform (stdev {stdev:.1}) (+{})",
                HP.rhythm_uniform_delta
            ));
        } else {
            out.delta += HP.rhythm_variance_delta;
            out.explanations.push(format!(
                "natural paragraph variance (stdev {stdev:.1}) ({})",
                HP.rhythm_variance_delta
            ));
        }
        out
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(Ruleset::default())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

static DEFAULT_DETECTOR: Lazy<Detector> = Lazy::new(Detector::default);

/// Analyze text against the built-in rule tables.
pub fn analyze(text: &str) -> AnalysisResult {
    DEFAULT_DETECTOR.analyze(text)
}

//! 赛事模型（只读）
//!
//! 状态徽章直接展示后端给出的值；进度条、剩余名额、奖金分配和赛程
//! 节点都在本地根据日期和数字计算。

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::date;
use crate::serde_helper;

/// 赛事状态
///
/// 后端可能返回未知状态，统一落入 `Unknown` 而不是反序列化失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
    #[serde(other)]
    Unknown,
}

impl TournamentStatus {
    /// 徽章文字，未知状态不显示徽章
    pub fn badge(&self) -> Option<&'static str> {
        match self {
            Self::Upcoming => Some("Coming Soon"),
            Self::Live => Some("Live Now"),
            Self::Completed => Some("Completed"),
            Self::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Live => "live",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }
}

/// 参赛队伍
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(alias = "_id", default, deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub captain: String,
    #[serde(default)]
    pub logo: Option<String>,
}

/// 赛事
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    #[serde(alias = "_id", default, deserialize_with = "serde_helper::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "serde_helper::lenient_datetime")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "serde_helper::lenient_datetime")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prize_pool: f64,
    #[serde(default)]
    pub entry_fee: f64,
    #[serde(default)]
    pub max_teams: u32,
    #[serde(default)]
    pub registered_teams: u32,
    #[serde(default)]
    pub status: TournamentStatus,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub team_size: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub organizer: Option<String>,
    #[serde(default)]
    pub rules: Option<String>,
}

/// 未提供规则时展示的默认文本
pub const DEFAULT_RULES: &str = "Standard tournament rules apply for this game. \
Full rulebook will be sent to team captains upon registration.";

/// 奖金分配比例（名次, 百分比）
pub const PRIZE_SHARES: [(&str, u32); 4] = [
    ("1st Place", 50),
    ("2nd Place", 25),
    ("3rd Place", 15),
    ("4th Place", 10),
];

/// 赛程节点
#[derive(Debug, Clone, PartialEq)]
pub struct Milestone {
    pub label: &'static str,
    pub starts: DateTime<Utc>,
    /// 区间型节点（如小组赛）的结束时间
    pub ends: Option<DateTime<Utc>>,
}

impl Tournament {
    /// 剩余名额；已报名数超过上限时按 0 处理
    pub fn slots_left(&self) -> u32 {
        self.max_teams.saturating_sub(self.registered_teams)
    }

    pub fn is_full(&self) -> bool {
        self.slots_left() == 0
    }

    /// 报名填充百分比（`registered/max`），上限为 0 时为 0
    pub fn fill_percent(&self) -> u8 {
        date::ratio_percent(self.registered_teams, self.max_teams)
    }

    /// 时间进度；缺少起止日期时为 0
    pub fn progress_at(&self, now: DateTime<Utc>) -> u8 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => date::progress_percent(start, end, now),
            _ => 0,
        }
    }

    pub fn rules_text(&self) -> &str {
        self.rules
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_RULES)
    }

    /// 奖金分配：50/25/15/10，四舍五入到整数
    pub fn prize_split(&self) -> Vec<(&'static str, u64)> {
        PRIZE_SHARES
            .iter()
            .map(|&(place, pct)| (place, (self.prize_pool * f64::from(pct) / 100.0).round() as u64))
            .collect()
    }

    /// 赛程节点，缺少日期时为空
    pub fn schedule(&self) -> Vec<Milestone> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Vec::new();
        };
        let point = |label, starts| Milestone { label, starts, ends: None };
        vec![
            point("Registration Opens", start - Duration::days(14)),
            point("Registration Closes", start),
            Milestone {
                label: "Group Stage",
                starts: start,
                ends: Some(start + Duration::days(3)),
            },
            point("Quarterfinals", start + Duration::days(4)),
            point("Semifinals", start + Duration::days(5)),
            point("Grand Finals", end),
        ]
    }
}

/// 金额展示："12,500"
pub fn format_money(amount: f64) -> String {
    let whole = amount.round().max(0.0) as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =========================================================
// 列表筛选 (Filtering)
// =========================================================

/// 筛选选项 (id, 展示名)
pub type FilterOption = (&'static str, &'static str);

pub const GAME_CATEGORIES: &[FilterOption] = &[
    ("all", "All Categories"),
    ("battle-royale", "Battle Royale"),
    ("fps", "FPS"),
    ("mobile", "Mobile Games"),
    ("esports", "Esports"),
];

pub const GAMES: &[FilterOption] = &[
    ("all", "All Games"),
    ("free-fire", "Free Fire"),
    ("pubg", "PUBG"),
    ("pubg-mobile", "PUBG Mobile"),
    ("cod", "COD (Coming Soon)"),
];

pub const STATUSES: &[FilterOption] = &[
    ("all", "All"),
    ("upcoming", "Upcoming"),
    ("live", "Live Now"),
    ("completed", "Completed"),
];

/// 列表筛选条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentFilter {
    /// 名称搜索（不区分大小写的子串匹配）
    pub query: String,
    /// 分类 / 游戏 / 状态 id，`all` 匹配全部
    pub category: String,
}

impl Default for TournamentFilter {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: "all".to_string(),
        }
    }
}

impl TournamentFilter {
    pub fn matches(&self, t: &Tournament) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_search = query.is_empty() || t.name.to_lowercase().contains(&query);
        let matches_category = self.category == "all"
            || t.category.eq_ignore_ascii_case(&self.category)
            || slug(&t.game) == self.category
            || t.status.as_str() == self.category;
        matches_search && matches_category
    }

    pub fn apply<'a>(&self, list: &'a [Tournament]) -> Vec<&'a Tournament> {
        list.iter().filter(|t| self.matches(t)).collect()
    }
}

/// "Free Fire" -> "free-fire"
fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

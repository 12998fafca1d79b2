//! Sylvanian Families characters, grouped by family.
//!
//! Members are ordered by their role in the family, and members sharing role and birthday
//! (twins, triplets) are folded into one event.

use std::cmp::Ordering;
use std::path::Path;
use std::str::FromStr;

use crate::calendar::{BirthdayCalendar, BirthdayOptions};
use crate::error::{CalendarError, CalendarResult};
use crate::ingestion::{LoadOptions, load_table};
use crate::processing::{Joined, group_by, left_join};
use crate::types::{BirthDate, Record, format_month_day, parse_optional};

pub const CALENDAR_NAME: &str = "Sylvanian Birthdays";

/// The first products went on sale on 1985-03-20.
pub const DEFAULT_YEAR: i32 = 1985;

pub const CHARACTER_COLUMNS: &[&str] = &["Family", "Relation1", "GivenName", "BirthMonth", "BirthDay"];
pub const FAMILY_COLUMNS: &[&str] = &["Family", "FamilyName"];

/// Display order of family roles; roles not listed sort last.
pub const RELATION_ORDER: [&str; 14] = [
    "お父さん",
    "お母さん",
    "お姉さん",
    "お兄さん",
    "女の子",
    "男の子",
    "ふたごの女の子",
    "ふたごの男の子",
    "赤ちゃん",
    "小さい赤ちゃん",
    "ふたごちゃん",
    "みつごちゃん",
    "おじいさん",
    "おばあさん",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "" => Ok(Self::Unspecified),
            other => Err(format!("expected M, F or empty, got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SylvanianCharacter {
    pub family: String,
    pub relation1: String,
    pub relation2: String,
    pub given_name: String,
    pub sex: Sex,
    pub favorites: String,
    pub birth_month: Option<u32>,
    pub birth_day: Option<u32>,
}

impl SylvanianCharacter {
    pub fn from_record(r: &Record) -> CalendarResult<Self> {
        let sex = r.value("Sex").trim();
        let sex = sex.parse::<Sex>().map_err(|message| CalendarError::ParseError {
            row: r.row(),
            column: "Sex".to_string(),
            raw: sex.to_owned(),
            message,
        })?;
        Ok(Self {
            family: r.string("Family"),
            relation1: r.string("Relation1"),
            relation2: r.string("Relation2"),
            given_name: r.string("GivenName"),
            sex,
            favorites: r.string("Favorites"),
            birth_month: parse_optional(r, "BirthMonth")?,
            birth_day: parse_optional(r, "BirthDay")?,
        })
    }

    pub fn birth_date(&self) -> Option<BirthDate> {
        BirthDate::from_parts(self.birth_month, self.birth_day)
    }

    /// `"{Relation1}({Relation2})"`, without parentheses when there is no sub-role.
    pub fn full_relation(&self) -> String {
        if self.relation2.is_empty() {
            self.relation1.clone()
        } else {
            format!("{}({})", self.relation1, self.relation2)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SylvanianFamily {
    pub family: String,
    pub family_name: String,
}

impl SylvanianFamily {
    pub fn from_record(r: &Record) -> CalendarResult<Self> {
        Ok(Self {
            family: r.string("Family"),
            family_name: r.string("FamilyName"),
        })
    }
}

type Member = Joined<SylvanianCharacter, SylvanianFamily>;

pub fn load_characters(path: impl AsRef<Path>, options: &LoadOptions) -> CalendarResult<Vec<SylvanianCharacter>> {
    load_table(path, &options.requiring(CHARACTER_COLUMNS), SylvanianCharacter::from_record)
}

pub fn load_families(path: impl AsRef<Path>, options: &LoadOptions) -> CalendarResult<Vec<SylvanianFamily>> {
    load_table(path, &options.requiring(FAMILY_COLUMNS), SylvanianFamily::from_record)
}

/// Load both tables and build the calendar.
pub fn create_calendar(
    characters_path: impl AsRef<Path>,
    families_path: impl AsRef<Path>,
    options: &LoadOptions,
) -> CalendarResult<BirthdayCalendar> {
    let characters = load_characters(characters_path, options)?;
    let families = load_families(families_path, options)?;
    Ok(assemble(characters, &families))
}

/// Build the calendar from already-loaded rows.
pub fn assemble(characters: Vec<SylvanianCharacter>, families: &[SylvanianFamily]) -> BirthdayCalendar {
    let joined = left_join(characters, families, |c| c.family.clone(), |f| f.family.clone());
    let by_family = group_by(joined, |m| m.left.family.clone());
    tracing::debug!(families = by_family.len(), characters = by_family.total_rows(), "grouped sylvanian characters");

    let mut bc = BirthdayCalendar::new(CALENDAR_NAME, DEFAULT_YEAR);
    for (_, mut members) in by_family {
        sort_family_members(&mut members);
        let table = family_table(&members);

        let by_role = group_by(members.iter(), |m| {
            let c = &m.left;
            format!(
                "{}-{}-{}",
                c.relation1,
                c.birth_month.map(|v| v.to_string()).unwrap_or_default(),
                c.birth_day.map(|v| v.to_string()).unwrap_or_default()
            )
        });
        for (_, same_role) in by_role {
            add_birthday_entry(&mut bc, &same_role, &table);
        }
    }
    bc
}

/// Rank of a relation in [`RELATION_ORDER`].
pub fn relation_rank(relation: &str) -> Option<usize> {
    RELATION_ORDER.iter().position(|r| *r == relation)
}

/// Sort by relation rank (unknown relations last), then by given name.
pub fn sort_family_members(members: &mut [Member]) {
    members.sort_by(|a, b| compare_members(&a.left, &b.left));
}

/// Relation rank first (unknown roles last), then given name by plain `str::cmp`; no locale collation.
fn compare_members(a: &SylvanianCharacter, b: &SylvanianCharacter) -> Ordering {
    let rank = match (relation_rank(&a.relation1), relation_rank(&b.relation1)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    rank.then_with(|| a.given_name.cmp(&b.given_name))
}

fn add_birthday_entry(bc: &mut BirthdayCalendar, members: &[&Member], family_table: &str) {
    let Some(first) = members.first() else {
        return;
    };
    let Some(date) = first.left.birth_date() else {
        return;
    };
    let c0 = &first.left;

    let mut summary = format!("{}の{}", c0.family, c0.relation1);
    if members.len() == 1 {
        if !c0.relation2.is_empty() {
            summary.push_str(&format!("({})", c0.relation2));
        }
        summary.push(' ');
        summary.push_str(&full_name(first));
    } else {
        let given_names = members
            .iter()
            .map(|m| given_name(&m.left))
            .collect::<Vec<_>>()
            .join("/");
        summary.push_str(&format!(" {given_names} {}", family_name(first)));
    }

    let group_list = if members.len() == 1 {
        c0.favorites.clone()
    } else {
        members
            .iter()
            .map(|m| {
                let favorites = if m.left.favorites.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", m.left.favorites)
                };
                format!("{} {}{favorites}", m.left.relation2, full_name(m))
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut blocks = Vec::with_capacity(2);
    if !group_list.is_empty() {
        blocks.push(group_list);
    }
    blocks.push(family_table.to_owned());

    bc.add_birthday(
        summary,
        date.month,
        date.day,
        BirthdayOptions {
            anchor_year: None,
            description: Some(blocks.join("\n\n")),
        },
    );
}

/// One line per member: role, given name and birthday.
fn family_table(members: &[Member]) -> String {
    members
        .iter()
        .map(|m| {
            let c = &m.left;
            format!(
                "{} {} {}",
                c.full_relation(),
                c.given_name,
                format_month_day(c.birth_month, c.birth_day)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn given_name(c: &SylvanianCharacter) -> &str {
    if c.given_name.is_empty() {
        "NoGivenName"
    } else {
        c.given_name.as_str()
    }
}

fn family_name(m: &Member) -> &str {
    m.right
        .as_ref()
        .map(|f| f.family_name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("NoFamilyName")
}

fn full_name(m: &Member) -> String {
    format!("{} {}", given_name(&m.left), family_name(m))
}

#[cfg(test)]
mod tests {
    use super::{
        Member, Sex, SylvanianCharacter, SylvanianFamily, assemble, relation_rank, sort_family_members,
    };
    use crate::processing::Joined;

    fn member(relation1: &str, relation2: &str, given: &str, month: Option<u32>, day: Option<u32>) -> SylvanianCharacter {
        SylvanianCharacter {
            family: "ショコラウサギ".to_string(),
            relation1: relation1.to_string(),
            relation2: relation2.to_string(),
            given_name: given.to_string(),
            sex: Sex::Unspecified,
            favorites: String::new(),
            birth_month: month,
            birth_day: day,
        }
    }

    fn families() -> Vec<SylvanianFamily> {
        vec![SylvanianFamily {
            family: "ショコラウサギ".to_string(),
            family_name: "ショコラ".to_string(),
        }]
    }

    #[test]
    fn sex_parses_known_codes_only() {
        assert_eq!("M".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!("F".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!("".parse::<Sex>(), Ok(Sex::Unspecified));
        assert!("X".parse::<Sex>().is_err());
    }

    #[test]
    fn members_sort_by_role_then_given_name() {
        let mut members: Vec<Member> = vec![
            member("ピアニスト", "", "A", None, None),
            member("女の子", "", "ミルク", None, None),
            member("お父さん", "", "フレーズ", None, None),
            member("女の子", "", "フレア", None, None),
        ]
        .into_iter()
        .map(|c| Joined { left: c, right: None })
        .collect();

        sort_family_members(&mut members);
        let names: Vec<_> = members.iter().map(|m| m.left.given_name.as_str()).collect();
        assert_eq!(names, vec!["フレーズ", "フレア", "ミルク", "A"]);
        assert_eq!(relation_rank("お父さん"), Some(0));
        assert_eq!(relation_rank("ピアニスト"), None);
    }

    #[test]
    fn given_names_within_a_role_sort_by_code_point() {
        let mut members: Vec<Member> = ["ア", "あ", "a", "Z"]
            .into_iter()
            .map(|given| Joined {
                left: member("女の子", "", given, None, None),
                right: None,
            })
            .collect();

        sort_family_members(&mut members);
        let names: Vec<_> = members.iter().map(|m| m.left.given_name.as_str()).collect();
        assert_eq!(names, vec!["Z", "a", "あ", "ア"]);
    }

    #[test]
    fn twins_share_one_entry_with_slash_joined_names() {
        let characters = vec![
            member("ふたごちゃん", "お兄さん", "ポロ", Some(5), Some(5)),
            member("ふたごちゃん", "弟", "ペロ", Some(5), Some(5)),
        ];
        let bc = assemble(characters, &families());

        assert_eq!(bc.len(), 1);
        let e = &bc.entries()[0];
        assert_eq!(e.summary, "ショコラウサギのふたごちゃん ペロ/ポロ ショコラ");
        assert_eq!(e.anchor_year, None);
        assert_eq!(
            e.description.as_deref(),
            Some(
                "弟 ペロ ショコラ\nお兄さん ポロ ショコラ\n\n\
                 ふたごちゃん(弟) ペロ 5/5\nふたごちゃん(お兄さん) ポロ 5/5"
            )
        );
    }

    #[test]
    fn single_member_summary_includes_sub_role_and_favorites() {
        let mut c = member("女の子", "長女", "フレア", Some(2), Some(29));
        c.favorites = "お菓子づくり".to_string();
        let bc = assemble(vec![c], &families());

        let e = &bc.entries()[0];
        assert_eq!(e.summary, "ショコラウサギの女の子(長女) フレア ショコラ");
        assert_eq!(
            e.description.as_deref(),
            Some("お菓子づくり\n\n女の子(長女) フレア 2/29")
        );
        assert_eq!(bc.start_year(e), 1984);
    }

    #[test]
    fn members_without_birthday_are_listed_but_skipped() {
        let characters = vec![
            member("お父さん", "", "フレーズ", None, None),
            member("お母さん", "", "ショコラ", Some(3), Some(20)),
        ];
        let bc = assemble(characters, &[]);

        assert_eq!(bc.len(), 1);
        let e = &bc.entries()[0];
        assert_eq!(e.summary, "ショコラウサギのお母さん ショコラ NoFamilyName");
        assert_eq!(
            e.description.as_deref(),
            Some("お父さん フレーズ ?/?\nお母さん ショコラ 3/20")
        );
    }
}

// Words seeded into an empty store on first start.

use super::moderation_models::{BannedCategory, NewWord, SuspiciousCategory, WordList};

const DEFAULT_BANNED_WORDS: &[(&str, BannedCategory)] = &[
    ("마약", BannedCategory::Illegal),
    ("대마", BannedCategory::Illegal),
    ("필로폰", BannedCategory::Illegal),
    ("위조지폐", BannedCategory::Illegal),
    ("짝퉁", BannedCategory::Illegal),
    ("성인용품", BannedCategory::Adult),
    ("음란물", BannedCategory::Adult),
    ("총기", BannedCategory::Weapon),
    ("실탄", BannedCategory::Weapon),
    ("가스총", BannedCategory::Weapon),
    ("주민등록번호", BannedCategory::PersonalInfo),
    ("신분증", BannedCategory::PersonalInfo),
    ("통장 대여", BannedCategory::PersonalInfo),
    ("대포통장", BannedCategory::IllegalService),
    ("대포폰", BannedCategory::IllegalService),
    ("대리시험", BannedCategory::IllegalService),
    ("처방전", BannedCategory::Medicine),
    ("전문의약품", BannedCategory::Medicine),
    ("비아그라", BannedCategory::Medicine),
];

const DEFAULT_SUSPICIOUS_WORDS: &[(&str, SuspiciousCategory)] = &[
    ("급처", SuspiciousCategory::UrgentSale),
    ("급매", SuspiciousCategory::UrgentSale),
    ("오늘만", SuspiciousCategory::UrgentSale),
    ("선입금", SuspiciousCategory::Payment),
    ("계좌이체만", SuspiciousCategory::Payment),
    ("현금만", SuspiciousCategory::Payment),
    ("카톡", SuspiciousCategory::Contact),
    ("텔레그램", SuspiciousCategory::Contact),
    ("문자주세요", SuspiciousCategory::Contact),
    ("미개봉", SuspiciousCategory::Claim),
    ("새제품", SuspiciousCategory::Claim),
    ("정품", SuspiciousCategory::Claim),
    ("최저가", SuspiciousCategory::Claim),
];

/// The seed set for a list.
pub fn default_words(list: WordList) -> Vec<NewWord> {
    match list {
        WordList::Banned => DEFAULT_BANNED_WORDS
            .iter()
            .map(|(word, category)| NewWord::new(*word, category.as_str()))
            .collect(),
        WordList::Suspicious => DEFAULT_SUSPICIOUS_WORDS
            .iter()
            .map(|(word, category)| NewWord::new(*word, category.as_str()))
            .collect(),
    }
}

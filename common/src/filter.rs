//! フィルタルールのリスト操作と一致判定
//!
//! ルールリストはUI側の親コンポーネントが所有し、ここの操作は
//! すべて所有されたVecをその場で書き換える。UIは複製したリストに
//! 適用してからスナップショット全体を単一のコールバックで publish
//! する（部分更新は存在しない）。

use crate::types::FilterRule;

/// 更新対象フィールドの指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleField {
    Column,
    Value,
}

/// 初期ルールセット（A〜D列を空/ゼロ一致でシード）
pub fn default_rules() -> Vec<FilterRule> {
    ["A", "B", "C", "D"]
        .iter()
        .map(|column| FilterRule::new(*column, "0"))
        .collect()
}

/// ルールを1件追加する（列"A"、値"0"を末尾に追加。上限なし）
pub fn add_rule(rules: &mut Vec<FilterRule>) {
    rules.push(FilterRule::new("A", "0"));
}

/// 指定インデックスのルールを削除する
///
/// 範囲外は何もしない。最後の1件を削除して空リストになるのも
/// 正当な状態（ルール0件での処理要求の解釈はサーバ側に委ねる）。
pub fn remove_rule(rules: &mut Vec<FilterRule>, index: usize) {
    if index < rules.len() {
        rules.remove(index);
    }
}

/// 指定インデックスのルールの1フィールドを更新する
///
/// 列は格納前に大文字化する。値は空白・制御文字・Unicodeを含め
/// そのまま格納する（サニタイズなし）。範囲外は何もしない。
pub fn update_rule(rules: &mut [FilterRule], index: usize, field: RuleField, value: &str) {
    let Some(rule) = rules.get_mut(index) else {
        return;
    };
    match field {
        RuleField::Column => rule.column = value.to_uppercase(),
        RuleField::Value => rule.value = value.to_string(),
    }
}

/// 現在のルールリストが過去ジョブのスナップショットと完全一致するか
///
/// 位置を含めた厳密比較: 長さが同じで、各位置のcolumnとvalueが
/// 大文字小文字も含めて等しい場合のみtrue。集合比較ではない。
/// スナップショットがない（null）レコードは常に不一致扱い。
pub fn rules_match(current: &[FilterRule], prior: Option<&[FilterRule]>) -> bool {
    let Some(prior) = prior else {
        return false;
    };
    if current.len() != prior.len() {
        return false;
    }
    current
        .iter()
        .zip(prior.iter())
        .all(|(a, b)| a.column == b.column && a.value == b.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> Vec<FilterRule> {
        pairs.iter().map(|(c, v)| FilterRule::new(*c, *v)).collect()
    }

    #[test]
    fn test_default_rules_seed() {
        let seeded = default_rules();
        assert_eq!(seeded.len(), 4);
        assert_eq!(seeded[0], FilterRule::new("A", "0"));
        assert_eq!(seeded[3], FilterRule::new("D", "0"));
    }

    #[test]
    fn test_add_appends_default_rule() {
        let mut list = rules(&[("F", "1")]);
        add_rule(&mut list);
        assert_eq!(list.len(), 2);
        assert_eq!(list[1], FilterRule::new("A", "0"));
        // 既存要素は不変
        assert_eq!(list[0], FilterRule::new("F", "1"));
    }

    #[test]
    fn test_add_has_no_upper_bound() {
        let mut list = Vec::new();
        for _ in 0..50 {
            add_rule(&mut list);
        }
        assert_eq!(list.len(), 50);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut list = rules(&[("A", "1"), ("B", "2"), ("C", "3")]);
        remove_rule(&mut list, 1);
        assert_eq!(list, rules(&[("A", "1"), ("C", "3")]));
    }

    #[test]
    fn test_remove_last_yields_empty() {
        let mut list = rules(&[("A", "0")]);
        remove_rule(&mut list, 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut list = rules(&[("A", "0")]);
        remove_rule(&mut list, 5);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_update_column_uppercases() {
        let mut list = rules(&[("A", "0"), ("B", "1")]);
        update_rule(&mut list, 1, RuleField::Column, "f");
        assert_eq!(list[1].column, "F");
        assert_eq!(list[1].value, "1");
        assert_eq!(list[0], FilterRule::new("A", "0"));
    }

    #[test]
    fn test_update_value_stored_verbatim() {
        let mut list = rules(&[("A", "0")]);
        update_rule(&mut list, 0, RuleField::Value, "  élan\t");
        assert_eq!(list[0].value, "  élan\t");
        assert_eq!(list[0].column, "A");
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let mut list = rules(&[("A", "0")]);
        update_rule(&mut list, 3, RuleField::Value, "x");
        assert_eq!(list, rules(&[("A", "0")]));
    }

    #[test]
    fn test_match_none_snapshot() {
        let current = rules(&[("A", "0")]);
        assert!(!rules_match(&current, None));
    }

    #[test]
    fn test_match_length_mismatch() {
        let current = rules(&[("A", "0"), ("B", "0")]);
        let prior = rules(&[("A", "0")]);
        assert!(!rules_match(&current, Some(&prior)));
        assert!(!rules_match(&current, Some(&[])));
    }

    #[test]
    fn test_match_both_empty() {
        assert!(rules_match(&[], Some(&[])));
    }

    #[test]
    fn test_match_pairwise_equal() {
        let current = rules(&[("F", "0"), ("G", "x")]);
        let prior = rules(&[("F", "0"), ("G", "x")]);
        assert!(rules_match(&current, Some(&prior)));
    }

    #[test]
    fn test_match_is_positional_not_set() {
        let current = rules(&[("F", "0"), ("G", "x")]);
        let swapped = rules(&[("G", "x"), ("F", "0")]);
        assert!(!rules_match(&current, Some(&swapped)));
    }

    #[test]
    fn test_match_value_case_sensitive() {
        let current = rules(&[("F", "abc")]);
        let prior = rules(&[("F", "ABC")]);
        assert!(!rules_match(&current, Some(&prior)));
    }
}

//! フィルタルールエディタコンポーネント
//!
//! ルールリストは親が所有する。各操作は現在のスナップショットを
//! 複製して共通クレートの操作を適用し、リスト全体を単一の
//! コールバックで返す。親は常に一貫した完全なスナップショットだけを
//! 観測する。

use excel_cleaner_common::{add_rule, remove_rule, update_rule, FilterRule, RuleField};
use leptos::prelude::*;

#[component]
pub fn FilterEditor<F>(rules: Signal<Vec<FilterRule>>, on_change: F) -> impl IntoView
where
    F: Fn(Vec<FilterRule>) + 'static + Clone + Send + Sync,
{
    let on_add = {
        let on_change = on_change.clone();
        move |_| {
            let mut next = rules.get_untracked();
            add_rule(&mut next);
            on_change(next);
        }
    };

    view! {
        <div class="filter-editor">
            <h3>"Filter rules"</h3>
            <p class="text-muted">
                "Rows matching every rule are deleted. Value \"0\" matches empty or zero cells."
            </p>
            <For
                each={move || (0..rules.get().len()).collect::<Vec<_>>()}
                key=|index| *index
                children=move |index| {
                    let on_update = {
                        let on_change = on_change.clone();
                        move |field: RuleField, value: String| {
                            let mut next = rules.get_untracked();
                            update_rule(&mut next, index, field, &value);
                            on_change(next);
                        }
                    };
                    let on_remove = {
                        let on_change = on_change.clone();
                        move |_| {
                            let mut next = rules.get_untracked();
                            remove_rule(&mut next, index);
                            on_change(next);
                        }
                    };
                    let on_update_column = on_update.clone();
                    let on_update_value = on_update;
                    view! {
                        <div class="filter-rule-row">
                            <label>"Column"</label>
                            <input
                                type="text"
                                class="rule-column"
                                prop:value=move || {
                                    rules.get()
                                        .get(index)
                                        .map(|rule| rule.column.clone())
                                        .unwrap_or_default()
                                }
                                on:input=move |ev| {
                                    on_update_column(RuleField::Column, event_target_value(&ev));
                                }
                            />
                            <label>"Value"</label>
                            <input
                                type="text"
                                class="rule-value"
                                prop:value=move || {
                                    rules.get()
                                        .get(index)
                                        .map(|rule| rule.value.clone())
                                        .unwrap_or_default()
                                }
                                on:input=move |ev| {
                                    on_update_value(RuleField::Value, event_target_value(&ev));
                                }
                            />
                            <button class="btn btn-tertiary btn-small" on:click=on_remove>
                                "Remove"
                            </button>
                        </div>
                    }
                }
            />
            <button class="btn btn-secondary btn-small" on:click=on_add>
                "Add rule"
            </button>
        </div>
    }
}

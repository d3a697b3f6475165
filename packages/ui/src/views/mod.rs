use chrono::NaiveDate;

mod confirm_dialog;
pub use confirm_dialog::ConfirmDialog;

mod horse_list;
pub use horse_list::HorseListView;

mod horse_detail;
pub use horse_detail::HorseDetailView;

mod horse_form;
pub use horse_form::HorseFormView;

mod family_tree;
pub use family_tree::FamilyTreeView;

mod owner_list;
pub use owner_list::OwnerListView;

mod owner_form;
pub use owner_form::OwnerFormView;

/// Date of birth as shown in tables, details and tree cards.
fn birth_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_date_is_day_first() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 7).unwrap();
        assert_eq!(birth_date(date), "07.03.2020");
    }
}

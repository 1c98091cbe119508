//! Holiday calendar page. The list is local to the page.

use chrono::Utc;
use portal_core::filter::{apply, HolidayFilter};
use portal_core::invariants::assert_unique_ids;
use portal_core::{can_add_holiday, seed_holidays, EntityList, Holiday, NewHoliday, User};
use tracing::info;

use super::PageError;

#[derive(Debug)]
pub struct HolidaysPage {
    holidays: EntityList<Holiday>,
    pub filter: HolidayFilter,
}

impl Default for HolidaysPage {
    fn default() -> Self {
        Self::mount()
    }
}

impl HolidaysPage {
    pub fn mount() -> Self {
        Self {
            holidays: EntityList::from_items(seed_holidays()),
            filter: HolidayFilter::default(),
        }
    }

    pub fn holidays(&self) -> &[Holiday] {
        self.holidays.items()
    }

    pub fn visible(&self) -> Vec<&Holiday> {
        apply(self.holidays.items(), &self.filter)
    }

    pub fn can_add(user: &User) -> bool {
        can_add_holiday(user)
    }

    /// Append a holiday; admin and HR only
    pub fn add(&mut self, user: &User, draft: &NewHoliday) -> Result<&Holiday, PageError> {
        if !Self::can_add(user) {
            return Err(PageError::Forbidden("edit the holiday calendar"));
        }
        let (name, date) = draft.validate()?;

        let mut candidate = Utc::now().timestamp_millis();
        while self.holidays.contains(&candidate.to_string()) {
            candidate += 1;
        }
        let holiday = Holiday {
            id: candidate.to_string(),
            name,
            date,
        };
        info!(id = %holiday.id, name = %holiday.name, "Holiday added");

        self.holidays.append(holiday);
        assert_unique_ids(self.holidays.ids(), "holidays");
        let items = self.holidays.items();
        Ok(&items[items.len() - 1])
    }
}

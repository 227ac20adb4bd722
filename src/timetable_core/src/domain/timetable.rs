//! Timetable entities: cabinets and the cells of the actual (dated) timetable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CabinetError {
    #[error("Cabinet address must not be blank")]
    BlankAddress,
    #[error("Cabinet number must not be blank")]
    BlankNumber,
}

/// Room where a lesson takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cabinet {
    id: i32,
    address: String,
    number: String,
}

impl Cabinet {
    pub fn new(
        id: i32,
        address: impl Into<String>,
        number: impl Into<String>,
    ) -> Result<Self, CabinetError> {
        let address = address.into();
        let number = number.into();
        if address.trim().is_empty() {
            return Err(CabinetError::BlankAddress);
        }
        if number.trim().is_empty() {
            return Err(CabinetError::BlankNumber);
        }
        Ok(Self {
            id,
            address,
            number,
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

/// One lesson on a concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualTimetableCell {
    pub id: i32,
    pub date: NaiveDate,
    pub is_modified: bool,
    pub is_canceled: bool,
    pub is_moved: bool,
    pub teacher_id: i32,
    pub subject_id: i32,
    pub cabinet_id: i32,
    pub lesson_time_id: i32,
    pub cabinet: Option<Cabinet>,
}

impl ActualTimetableCell {
    pub fn new(
        id: i32,
        date: NaiveDate,
        teacher_id: i32,
        subject_id: i32,
        cabinet_id: i32,
        lesson_time_id: i32,
    ) -> Self {
        Self {
            id,
            date,
            is_modified: false,
            is_canceled: false,
            is_moved: false,
            teacher_id,
            subject_id,
            cabinet_id,
            lesson_time_id,
            cabinet: None,
        }
    }

    pub fn with_cabinet(mut self, cabinet: Cabinet) -> Self {
        self.cabinet_id = cabinet.id();
        self.cabinet = Some(cabinet);
        self
    }

    pub fn cancel(&mut self) {
        self.is_canceled = true;
        self.is_modified = true;
    }

    /// Moves the lesson to another room.
    pub fn move_to_cabinet(&mut self, cabinet: Cabinet) {
        if self.cabinet_id != cabinet.id() {
            self.is_moved = true;
            self.is_modified = true;
        }
        self.cabinet_id = cabinet.id();
        self.cabinet = Some(cabinet);
    }

    /// Replaces teacher and subject, e.g. for a substitution.
    pub fn modify(&mut self, teacher_id: i32, subject_id: i32) {
        self.teacher_id = teacher_id;
        self.subject_id = subject_id;
        self.is_modified = true;
    }
}

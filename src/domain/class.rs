use serde::{Deserialize, Serialize};

use crate::domain::{
    bucket::{BucketSlot, MonthBucket},
    month::MonthTag,
};

/// A tutoring class and its six-month billing window. The class name is the
/// primary key of the persisted collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRecord {
    pub name: String,
    pub rotation_tag: MonthTag,
    pub window: MonthWindow,
}

impl ClassRecord {
    pub fn new(name: impl Into<String>, fee_per_session: f64, tag: MonthTag) -> Self {
        Self {
            name: name.into(),
            rotation_tag: tag,
            window: MonthWindow::new(fee_per_session),
        }
    }

    pub fn current(&self) -> &MonthBucket {
        &self.window.current
    }

    pub fn current_mut(&mut self) -> &mut MonthBucket {
        &mut self.window.current
    }

    pub fn bucket(&self, slot: BucketSlot) -> &MonthBucket {
        self.window.get(slot)
    }

    pub fn bucket_mut(&mut self, slot: BucketSlot) -> &mut MonthBucket {
        self.window.get_mut(slot)
    }

    pub fn fee_per_session(&self) -> f64 {
        self.window.current.fee_per_session
    }

    /// Advances the window to `today` unless it is already there. Returns
    /// whether a shift happened.
    pub fn rotate_to(&mut self, today: MonthTag) -> bool {
        if self.rotation_tag.matches(&today) {
            return false;
        }
        let opening = self.window.current.next_month();
        self.window.shift(opening);
        self.rotation_tag = today;
        true
    }
}

/// Fixed-depth window of monthly buckets, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthWindow {
    pub current: MonthBucket,
    #[serde(default)]
    pub one_ago: MonthBucket,
    #[serde(default)]
    pub two_ago: MonthBucket,
    #[serde(default)]
    pub three_ago: MonthBucket,
    #[serde(default)]
    pub four_ago: MonthBucket,
    #[serde(default)]
    pub five_ago: MonthBucket,
}

impl MonthWindow {
    pub fn new(fee_per_session: f64) -> Self {
        Self {
            current: MonthBucket::empty(fee_per_session),
            one_ago: MonthBucket::empty(fee_per_session),
            two_ago: MonthBucket::empty(fee_per_session),
            three_ago: MonthBucket::empty(fee_per_session),
            four_ago: MonthBucket::empty(fee_per_session),
            five_ago: MonthBucket::empty(fee_per_session),
        }
    }

    pub fn get(&self, slot: BucketSlot) -> &MonthBucket {
        match slot {
            BucketSlot::Current => &self.current,
            BucketSlot::OneAgo => &self.one_ago,
            BucketSlot::TwoAgo => &self.two_ago,
            BucketSlot::ThreeAgo => &self.three_ago,
            BucketSlot::FourAgo => &self.four_ago,
            BucketSlot::FiveAgo => &self.five_ago,
        }
    }

    pub fn get_mut(&mut self, slot: BucketSlot) -> &mut MonthBucket {
        match slot {
            BucketSlot::Current => &mut self.current,
            BucketSlot::OneAgo => &mut self.one_ago,
            BucketSlot::TwoAgo => &mut self.two_ago,
            BucketSlot::ThreeAgo => &mut self.three_ago,
            BucketSlot::FourAgo => &mut self.four_ago,
            BucketSlot::FiveAgo => &mut self.five_ago,
        }
    }

    /// Pushes every bucket one month back, installs `opening` as the new
    /// current bucket, and returns the bucket that fell off the end.
    pub fn shift(&mut self, opening: MonthBucket) -> MonthBucket {
        let dropped = std::mem::take(&mut self.five_ago);
        self.five_ago = std::mem::take(&mut self.four_ago);
        self.four_ago = std::mem::take(&mut self.three_ago);
        self.three_ago = std::mem::take(&mut self.two_ago);
        self.two_ago = std::mem::take(&mut self.one_ago);
        self.one_ago = std::mem::replace(&mut self.current, opening);
        dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = (BucketSlot, &MonthBucket)> + '_ {
        BucketSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

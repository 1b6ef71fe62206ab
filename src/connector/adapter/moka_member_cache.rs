use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use crate::application::MemberCache;
use crate::domain::Member;

/// Size-bounded member cache whose entries expire a fixed time after insertion.
pub struct MokaMemberCache {
    cache: Cache<i64, Member>,
}

impl MokaMemberCache {
    pub fn new(capacity: u64, time_to_live: Duration) -> Self {
        debug!(
            "Creating member cache (capacity {}, ttl {:?})",
            capacity, time_to_live
        );
        Self {
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(time_to_live)
                .build(),
        }
    }
}

impl MemberCache for MokaMemberCache {
    fn get(&self, id: i64) -> Option<Member> {
        self.cache.get(&id)
    }

    fn put(&self, id: i64, member: Member) {
        self.cache.insert(id, member);
    }

    fn invalidate(&self, id: i64) {
        self.cache.invalidate(&id);
    }

    fn clear(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{MemberRole, Specialty};

    fn coach(id: i64) -> Member {
        Member::new(
            "Luis",
            "Aragonés",
            NaiveDate::from_ymd_opt(1938, 7, 28).unwrap(),
            NaiveDate::from_ymd_opt(2004, 7, 1).unwrap(),
            50000.0,
            "España",
            MemberRole::Coach(Specialty::HeadCoach),
        )
        .with_id(id)
    }

    #[test]
    fn test_put_get_invalidate() {
        let cache = MokaMemberCache::new(10, Duration::from_secs(60));
        cache.put(1, coach(1));
        assert_eq!(cache.get(1).map(|m| m.id()), Some(1));

        cache.invalidate(1);
        assert!(cache.get(1).is_none());
    }

    #[test]
    fn test_clear_removes_everything() {
        let cache = MokaMemberCache::new(10, Duration::from_secs(60));
        cache.put(1, coach(1));
        cache.put(2, coach(2));
        cache.clear();
        assert!(cache.get(1).is_none());
        assert!(cache.get(2).is_none());
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let cache = MokaMemberCache::new(10, Duration::from_millis(50));
        cache.put(7, coach(7));
        assert!(cache.get(7).is_some());

        std::thread::sleep(Duration::from_millis(120));
        assert!(cache.get(7).is_none());
    }
}

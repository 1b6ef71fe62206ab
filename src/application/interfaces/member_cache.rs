use crate::domain::Member;

/// Bounded, expiring lookaside cache for members keyed by id.
pub trait MemberCache: Send + Sync {
    fn get(&self, id: i64) -> Option<Member>;

    fn put(&self, id: i64, member: Member);

    fn invalidate(&self, id: i64);

    fn clear(&self);
}

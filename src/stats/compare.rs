use crate::model::stats::{MemberTotal, Stats};

/// Rank members by total time, highest first. Equal totals keep input order.
pub fn rank_members<'a, I, K>(members: I) -> Vec<MemberTotal>
where
    I: IntoIterator<Item = (K, &'a Stats)>,
    K: Into<String>,
{
    let mut ranked: Vec<MemberTotal> = members
        .into_iter()
        .map(|(name, stats)| MemberTotal {
            name: name.into(),
            total_time: stats.total_time,
        })
        .collect();

    ranked.sort_by(|a, b| b.total_time.cmp(&a.total_time));
    ranked
}

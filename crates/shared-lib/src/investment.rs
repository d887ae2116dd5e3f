//! 投资分配算法
//!
//! 新建项目或新建捐款时，需要把资金在"新对象"和"对手方未完成对象"之间进行分配：
//!
//! - 新建项目：从最早的未分配完的捐款开始，依次把捐款余额投入项目
//! - 新建捐款：从最早的未筹满的项目开始，依次把捐款投入项目
//!
//! 两个方向的算法完全对称，因此抽象为 [`Investable`] 特征，由数据库模型实现。
//!
//! 这里只做纯内存计算，不涉及任何IO。持久化和事务由调用方（仓库层）负责。

use chrono::NaiveDateTime;
use tracing::debug;

/// 可参与投资分配的对象（慈善项目、捐款）
pub trait Investable {
    /// 目标金额（项目）或捐款金额（捐款）
    fn full_amount(&self) -> i64;

    /// 已分配金额
    fn invested_amount(&self) -> i64;

    /// 更新已分配金额
    fn set_invested_amount(&mut self, amount: i64);

    /// 标记为已完成，并记录完成时间
    fn close(&mut self, close_date: NaiveDateTime);

    fn is_fully_invested(&self) -> bool;

    /// 剩余可分配金额
    fn remaining(&self) -> i64 {
        self.full_amount() - self.invested_amount()
    }
}

/// 给`entity`增加`amount`的已分配金额，正好达到目标金额时关闭
fn add_investment<T: Investable + ?Sized>(entity: &mut T, amount: i64, now: NaiveDateTime) {
    entity.set_invested_amount(entity.invested_amount() + amount);
    if entity.remaining() == 0 && !entity.is_fully_invested() {
        entity.close(now);
    }
}

/// 把`target`的剩余金额分配到`counterparts`上
///
/// `counterparts` 必须已经按创建时间升序排列（先到先得），并且都是未完成的对象。
///
/// # 返回值
///
/// 返回被修改过的对手方个数`n`，调用方只需要持久化 `target` 和 `counterparts[..n]`。
/// 如果返回0，说明没有发生任何分配。
pub fn invest<T, C>(target: &mut T, counterparts: &mut [C], now: NaiveDateTime) -> usize
where
    T: Investable + ?Sized,
    C: Investable,
{
    let mut touched = 0;

    for counterpart in counterparts.iter_mut() {
        let remaining = target.remaining();
        if remaining <= 0 {
            break;
        }

        // min保证任何一方都不会超投
        let delta = remaining.min(counterpart.remaining());
        touched += 1;
        if delta <= 0 {
            continue;
        }

        add_investment(counterpart, delta, now);
        add_investment(target, delta, now);
    }

    debug!("💸 分配完成: 涉及 {} 个对象, 剩余 {}", touched, target.remaining());
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq)]
    struct Funds {
        full: i64,
        invested: i64,
        closed_at: Option<NaiveDateTime>,
    }

    impl Funds {
        fn open(full: i64) -> Self {
            Self { full, invested: 0, closed_at: None }
        }

        fn partially(full: i64, invested: i64) -> Self {
            Self { full, invested, closed_at: None }
        }

        fn closed(full: i64) -> Self {
            Self { full, invested: full, closed_at: Some(now()) }
        }
    }

    impl Investable for Funds {
        fn full_amount(&self) -> i64 {
            self.full
        }

        fn invested_amount(&self) -> i64 {
            self.invested
        }

        fn set_invested_amount(&mut self, amount: i64) {
            self.invested = amount;
        }

        fn close(&mut self, close_date: NaiveDateTime) {
            self.closed_at = Some(close_date);
        }

        fn is_fully_invested(&self) -> bool {
            self.closed_at.is_some()
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 9)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn assert_consistent(funds: &Funds) {
        assert!(funds.invested <= funds.full, "over invested: {funds:?}");
        assert_eq!(funds.is_fully_invested(), funds.invested == funds.full, "{funds:?}");
    }

    #[test]
    fn no_counterparts_leaves_target_untouched() {
        let mut target = Funds::open(500);
        let mut counterparts: Vec<Funds> = Vec::new();

        assert_eq!(invest(&mut target, &mut counterparts, now()), 0);
        assert_eq!(target, Funds::open(500));
    }

    #[test]
    fn exact_match_closes_both_sides() {
        let mut target = Funds::open(300);
        let mut counterparts = vec![Funds::open(300)];

        assert_eq!(invest(&mut target, &mut counterparts, now()), 1);
        assert_eq!(target.closed_at, Some(now()));
        assert_eq!(counterparts[0].closed_at, Some(now()));
        assert_eq!(counterparts[0].invested, 300);
    }

    #[test]
    fn oldest_counterpart_is_served_first() {
        let mut donation = Funds::open(400);
        let mut projects = vec![Funds::open(400), Funds::open(1000)];

        assert_eq!(invest(&mut donation, &mut projects, now()), 1);
        assert!(projects[0].is_fully_invested());
        assert_eq!(projects[1], Funds::open(1000));
    }

    #[test]
    fn target_spreads_over_several_counterparts() {
        let mut project = Funds::open(1000);
        let mut donations = vec![Funds::partially(500, 200), Funds::open(400), Funds::open(900)];

        assert_eq!(invest(&mut project, &mut donations, now()), 3);
        assert_eq!(project.invested, 1000);
        assert!(project.is_fully_invested());
        assert_eq!(donations[0].invested, 500);
        assert_eq!(donations[1].invested, 400);
        assert_eq!(donations[2].invested, 300);
        assert!(!donations[2].is_fully_invested());
    }

    #[test]
    fn project_with_two_donations() {
        // 项目1000，先后捐款700和400
        let mut project = Funds::open(1000);

        let mut first = Funds::open(700);
        invest(&mut first, std::slice::from_mut(&mut project), now());
        assert_eq!(first.invested, 700);
        assert!(first.is_fully_invested());
        assert_eq!(project.invested, 700);

        let mut second = Funds::open(400);
        invest(&mut second, std::slice::from_mut(&mut project), now());
        assert_eq!(project.invested, 1000);
        assert!(project.is_fully_invested());
        assert_eq!(second.invested, 300);
        assert!(!second.is_fully_invested());
        assert_eq!(second.closed_at, None);
    }

    #[rstest]
    #[case(100, &[50, 50, 50])]
    #[case(1, &[3])]
    #[case(10_000, &[1, 2, 3, 4])]
    #[case(250, &[0, 100, 150])]
    fn amounts_never_exceed_targets(#[case] target_amount: i64, #[case] counterpart_amounts: &[i64]) {
        let mut target = Funds::open(target_amount);
        let mut counterparts: Vec<Funds> = counterpart_amounts
            .iter()
            .map(|&full| if full == 0 { Funds::closed(10) } else { Funds::open(full) })
            .collect();

        let touched = invest(&mut target, &mut counterparts, now());

        assert_consistent(&target);
        counterparts.iter().for_each(assert_consistent);
        assert!(touched <= counterparts.len());

        let moved: i64 = counterparts.iter().map(|c| c.invested).sum::<i64>()
            - counterpart_amounts.iter().filter(|&&a| a == 0).count() as i64 * 10;
        assert_eq!(moved, target.invested);
    }
}

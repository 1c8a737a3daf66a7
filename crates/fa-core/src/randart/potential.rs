//! The power budget of one artifact design
//!
//! Every quality bought debits the budget; curses and weaknesses are the
//! only things that pay back into it. At any time
//! `spent + remaining == initial + credited`.

/// How a purchase treats an insufficient balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseMode {
    /// Refuse if the cost exceeds the balance
    Strict,
    /// Accept anyway; the balance drops to zero and only what was left is
    /// recorded as spent
    AllowOverdraft,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Potential {
    initial: i32,
    remaining: i32,
    credited: i32,
    spent: i32,
}

impl Potential {
    pub fn new(initial: i32) -> Self {
        let initial = initial.max(0);
        Self {
            initial,
            remaining: initial,
            credited: 0,
            spent: 0,
        }
    }

    pub fn initial(&self) -> i32 {
        self.initial
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn credited(&self) -> i32 {
        self.credited
    }

    pub fn spent(&self) -> i32 {
        self.spent
    }

    /// Try to pay `cost`. Costs below zero are free. Returns whether the
    /// purchase went through.
    pub fn try_debit(&mut self, cost: i32, mode: PurchaseMode) -> bool {
        let cost = cost.max(0);
        if cost <= self.remaining {
            self.remaining -= cost;
            self.spent += cost;
            return true;
        }
        match mode {
            PurchaseMode::Strict => false,
            PurchaseMode::AllowOverdraft => {
                self.spent += self.remaining;
                self.remaining = 0;
                true
            }
        }
    }

    /// Pay back into the budget (curses and weaknesses only)
    pub fn credit(&mut self, amount: i32) {
        let amount = amount.max(0);
        self.remaining += amount;
        self.credited += amount;
    }

    /// Whether the books balance
    pub fn is_conserved(&self) -> bool {
        self.spent + self.remaining == self.initial + self.credited
    }

    /// Share of the whole budget that was used, in percent
    pub fn used_percent(&self) -> i32 {
        let total = self.initial + self.credited;
        if total <= 0 {
            return 0;
        }
        (self.spent as i64 * 100 / total as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_refuses() {
        let mut p = Potential::new(500);
        assert!(p.try_debit(300, PurchaseMode::Strict));
        assert!(!p.try_debit(300, PurchaseMode::Strict));
        assert_eq!(p.remaining(), 200);
        assert_eq!(p.spent(), 300);
        assert!(p.is_conserved());
    }

    #[test]
    fn test_overdraft_clamps_to_zero() {
        let mut p = Potential::new(500);
        assert!(p.try_debit(800, PurchaseMode::AllowOverdraft));
        assert_eq!(p.remaining(), 0);
        assert_eq!(p.spent(), 500);
        assert!(p.is_conserved());
    }

    #[test]
    fn test_negative_cost_is_free() {
        let mut p = Potential::new(100);
        assert!(p.try_debit(-50, PurchaseMode::Strict));
        assert_eq!(p.remaining(), 100);
    }

    #[test]
    fn test_credit_balances() {
        let mut p = Potential::new(100);
        p.try_debit(100, PurchaseMode::Strict);
        p.credit(400);
        p.credit(-10);
        assert_eq!(p.remaining(), 400);
        assert_eq!(p.credited(), 400);
        assert!(p.is_conserved());
        assert_eq!(p.used_percent(), 20);
    }
}

use crate::model::*;

// (ron, tsumo payment of a non-dealer, tsumo payment of the dealer)
pub type Points = (Point, Point, Point);

pub const HONBA_POINT: Point = 300; // per honba, split among the payers on tsumo
pub const RIICHI_STICK_POINT: Point = 1000;

#[inline]
pub fn ceil100(n: Point) -> Point {
    (n + 99) / 100 * 100
}

pub fn calc_base_point(fu: usize, fan: usize, yakuman: usize) -> Point {
    (if yakuman != 0 {
        8000 * yakuman
    } else {
        match fan {
            0..=4 => (fu << (fan + 2)).min(2000), // mangan cap
            5 => 2000,                            // mangan
            6..=7 => 3000,                        // haneman
            8..=10 => 4000,                       // baiman
            11..=12 => 6000,                      // sanbaiman
            _ => 8000,                            // kazoe yakuman
        }
    }) as Point
}

pub fn get_score_title(base_point: Point, yakuman: usize) -> String {
    match yakuman {
        0 => match base_point {
            2000 => "Mangan",
            3000 => "Haneman",
            4000 => "Baiman",
            6000 => "Sanbaiman",
            8000 => "Kazoe Yakuman",
            _ => "",
        }
        .to_string(),
        1 => "Yakuman".to_string(),
        2 => "Double Yakuman".to_string(),
        3 => "Triple Yakuman".to_string(),
        n => format!("{}x Yakuman", n),
    }
}

// payments without honba
pub fn calc_points(is_dealer: bool, fu: usize, fan: usize, yakuman: usize) -> (Points, String) {
    let base = calc_base_point(fu, fan, yakuman);
    let title = get_score_title(base, yakuman);
    if is_dealer {
        ((ceil100(base * 6), ceil100(base * 2), 0), title)
    } else {
        ((ceil100(base * 4), ceil100(base), ceil100(base * 2)), title)
    }
}

// Who pays how much, honba included. Winds identify the players.
// Riichi sticks on the table are not payments and are added by the caller.
pub fn calc_payments(
    base_point: Point,
    is_dealer: bool,
    is_self_drawn: bool,
    winner: Tnum,
    discarder: Option<Tnum>,
    honba: usize,
) -> Vec<Payment> {
    let honba = honba as Point;
    match (is_self_drawn, discarder) {
        (false, Some(d)) => {
            let mul = if is_dealer { 6 } else { 4 };
            vec![Payment {
                payer: d,
                amount: ceil100(base_point * mul) + HONBA_POINT * honba,
            }]
        }
        _ => (WE..=WN)
            .filter(|&w| w != winner)
            .map(|w| {
                let mul = if is_dealer || w == WE { 2 } else { 1 };
                Payment {
                    payer: w,
                    amount: ceil100(base_point * mul) + HONBA_POINT / 3 * honba,
                }
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_point() {
        assert_eq!(calc_base_point(30, 1, 0), 240);
        assert_eq!(calc_base_point(20, 2, 0), 320);
        assert_eq!(calc_base_point(70, 3, 0), 2000);
        assert_eq!(calc_base_point(30, 4, 0), 1920);
        assert_eq!(calc_base_point(25, 6, 0), 3000);
        assert_eq!(calc_base_point(30, 13, 0), 8000);
        assert_eq!(calc_base_point(30, 0, 2), 16000);
        // stacked dora never overflow
        assert_eq!(calc_base_point(110, 64, 0), 8000);
        assert_eq!(calc_base_point(110, usize::MAX, 0), 8000);
        assert_eq!(get_score_title(calc_base_point(40, 4, 0), 0), "Mangan");
        assert_eq!(get_score_title(1920, 0), "");
        assert_eq!(get_score_title(16000, 2), "Double Yakuman");
    }

    #[test]
    fn test_payments() {
        // non-dealer ron 1 han 30 fu
        let ps = calc_payments(240, false, false, WS, Some(WW), 0);
        assert_eq!(ps, vec![Payment { payer: WW, amount: 1000 }]);

        // non-dealer tsumo 2 han 20 fu: 400/700
        let ps = calc_payments(320, false, true, WS, None, 0);
        let amounts: Vec<_> = ps.iter().map(|p| (p.payer, p.amount)).collect();
        assert_eq!(amounts, vec![(WE, 700), (WW, 400), (WN, 400)]);

        // dealer tsumo mangan with 2 honba
        let ps = calc_payments(2000, true, true, WE, None, 2);
        assert!(ps.iter().all(|p| p.amount == 4200));
        assert_eq!(ps.len(), 3);

        // ron with honba
        let ps = calc_payments(2000, false, false, WN, Some(WE), 1);
        assert_eq!(ps[0].amount, 8300);
    }

    // self-draw payments add up to the ron value up to rounding
    #[test]
    fn test_tsumo_sums() {
        for fu in [20, 30, 40, 50, 60, 70, 80, 90, 100, 110] {
            for fan in 1..=13 {
                for is_dealer in [false, true] {
                    let base = calc_base_point(fu, fan, 0);
                    let winner = if is_dealer { WE } else { WS };
                    let ps = calc_payments(base, is_dealer, true, winner, None, 0);
                    let total: Point = ps.iter().map(|p| p.amount).sum();
                    let ((ron, _, _), _) = calc_points(is_dealer, fu, fan, 0);
                    assert!(total >= ron - 100 && total <= ron + 300, "{} {}", fu, fan);
                    if base >= 2000 {
                        assert_eq!(total, ron);
                    }
                }
            }
        }
    }

    // standard self-draw table: (non-dealer payment, dealer payment)
    #[test]
    fn test_tsumo_table() {
        let split = |is_dealer: bool, fu: usize, fan: usize| -> Vec<Point> {
            let winner = if is_dealer { WE } else { WS };
            let base = calc_base_point(fu, fan, 0);
            calc_payments(base, is_dealer, true, winner, None, 0)
                .iter()
                .map(|p| p.amount)
                .collect()
        };
        // payers in wind order from east, the winner excluded
        assert_eq!(split(false, 30, 1), vec![500, 300, 300]);
        assert_eq!(split(false, 30, 3), vec![2000, 1000, 1000]);
        assert_eq!(split(false, 40, 3), vec![2600, 1300, 1300]);
        assert_eq!(split(false, 20, 4), vec![2600, 1300, 1300]);
        assert_eq!(split(false, 30, 5), vec![4000, 2000, 2000]);
        assert_eq!(split(true, 30, 2), vec![1000, 1000, 1000]);
        assert_eq!(split(true, 20, 3), vec![1300, 1300, 1300]);
        assert_eq!(split(true, 25, 4), vec![3200, 3200, 3200]);

        assert_eq!(calc_points(false, 30, 3, 0).0, (3900, 1000, 2000));
        assert_eq!(calc_points(true, 30, 2, 0).0, (2900, 1000, 0));
    }

    // cargo test print_points_table -- --ignored --nocapture
    #[test]
    #[ignore]
    fn print_points_table() {
        let fu_list = [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110];

        println!("Points (non-dealer) ========================================");
        for fu in fu_list {
            print!("[{fu:3} fu] ");
            for fan in 1..=4 {
                let (scores, _) = calc_points(false, fu, fan, 0);
                print!("{fan}han:{:4}({:4}/{:4}) ", scores.0, scores.1, scores.2)
            }
            println!();
        }
        for fan in 5..=13 {
            let (scores, title) = calc_points(false, 20, fan, 0);
            println!(
                "{fan:2}han:{:5}({:4}/{:5}) {title}",
                scores.0, scores.1, scores.2
            );
        }
        println!();

        println!("Points (dealer) ============================================");
        for fu in fu_list {
            print!("[{fu:3} fu] ");
            for fan in 1..=4 {
                let (scores, _) = calc_points(true, fu, fan, 0);
                print!("{fan}han:{:5}({:4}) ", scores.0, scores.1)
            }
            println!();
        }
        for fan in 5..=13 {
            let (scores, title) = calc_points(true, 20, fan, 0);
            println!("{fan:2}han:{:5}({:5}) {title}", scores.0, scores.1);
        }
        println!();
    }
}

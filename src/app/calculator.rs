use std::fmt::Write;
use std::fs::File;
use std::io::{self, BufRead};

use crate::hand::evaluate_hand;
use crate::model::*;
use crate::util::log::{set_log_level, Level};
use crate::util::misc::*;

use crate::error;

#[derive(Debug)]
pub struct CalculatorApp {
    args: Vec<String>,
    detail: bool,
    json: bool,
}

impl CalculatorApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            detail: false,
            json: false,
        }
    }

    pub fn run(&mut self) {
        let mut file_path = "".to_string();
        let mut exp = "".to_string();
        let mut it = self.args.iter();
        while let Some(s) = it.next() {
            match s.as_str() {
                "-d" => {
                    self.detail = true;
                    set_log_level(Level::Debug);
                }
                "-j" => self.json = true,
                "-f" => file_path = next_value(&mut it, s),
                _ => {
                    if s.starts_with('-') {
                        error!("unknown option: {}", s);
                        return;
                    }
                    if !exp.is_empty() {
                        error!("multiple expression is not allowed");
                        return;
                    }
                    exp = s.clone();
                }
            }
        }

        if file_path.is_empty() == exp.is_empty() {
            print_usage();
            return;
        }

        let res = if exp.is_empty() {
            self.run_from_file(&file_path)
        } else {
            self.process_expression(&exp).map(|_| ())
        };
        if let Err(e) = res {
            error!("{}", e);
        }
    }

    fn run_from_file(&self, file_path: &str) -> Res {
        let file = File::open(file_path)?;
        let lines = io::BufReader::new(file).lines();
        for exp in lines.map_while(Result::ok) {
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                println!("> {}", exp);
            } else if let Err(e) = self.process_expression(&exp) {
                error!("{}", e);
            }
            println!();
        }
        Ok(())
    }

    fn process_expression(&self, exp: &str) -> Res<Verify> {
        let mut calculator = Calculator::new(self.detail, self.json);
        calculator.parse(exp)?;
        calculator.run()
    }
}

#[derive(Debug, PartialEq)]
enum Verify {
    Ok,
    Error,
    Skip,
}

// One expression:
//   HAND[+][,MELD...]/WINDS[,DORAS[,URAS]]/FLAGS/FU,FAN,SCORE
// The last tile of HAND is the winning tile, '+' marks a win on a discard.
// WINDS is the round wind followed by the seat wind ("ES": east round, south seat).
#[derive(Debug)]
struct Calculator {
    detail: bool,
    json: bool,
    // evaluate_hand params
    hand: Hand,
    winning_tile: Tile,
    ctx: Context,
    // score verify
    verify: bool,
    fu: usize,
    fan: usize,
    score: Point,
}

impl Calculator {
    fn new(detail: bool, json: bool) -> Self {
        Self {
            detail,
            json,
            hand: Hand::default(),
            winning_tile: Z8,
            ctx: Context::default(),
            verify: false,
            fu: 0,
            fan: 0,
            score: 0,
        }
    }

    fn parse(&mut self, input: &str) -> Res {
        println!("> {}", input);

        let input = input.replace(' ', "");
        let input = input.split('#').next().unwrap_or(""); // strip comment
        let exps: Vec<&str> = input.split('/').collect();
        let len = exps.len();
        if len > 1 {
            self.parse_stage_info(exps[1])?; // the discarder depends on the seat wind
        }
        self.parse_hand_meld(exps[0])?;
        if len > 2 {
            self.parse_flags(exps[2])?;
        }
        if len > 3 {
            self.parse_score_verify(exps[3])?;
        }
        self.ctx.kan_count = self.ctx.kan_count.max(self.hand.count_kan());

        if self.detail {
            println!("{:?}", self);
        }

        Ok(())
    }

    fn run(&self) -> Res<Verify> {
        let verdict = evaluate_hand(&self.hand, self.winning_tile, &self.ctx)?;
        if self.json {
            println!("{}", serde_json::to_string(&verdict)?);
        }

        let verify = match &verdict {
            Verdict::Win(res) => {
                if self.detail {
                    println!("{:?}", res);
                }

                let mut yakus = "".to_string();
                for y in &res.yakus {
                    let _ = write!(yakus, "{}({}), ", y.name, y.fan);
                }
                println!("yakus: {}", yakus);
                println!(
                    "fu: {}, fan: {}, yakuman: {}, score: {}, total: {}, {}",
                    res.fu, res.fan, res.yakuman, res.score, res.total, res.title
                );

                if !self.verify {
                    Verify::Skip
                } else if res.yakuman > 0 {
                    // fu and han are meaningless for yakuman
                    if res.score == self.score {
                        Verify::Ok
                    } else {
                        Verify::Error
                    }
                } else if res.fu == self.fu && res.fan == self.fan && res.score == self.score {
                    Verify::Ok
                } else {
                    Verify::Error
                }
            }
            v => {
                match v {
                    Verdict::NoDecomposition { shanten } => {
                        println!("not win hand (shanten: {})", shanten)
                    }
                    _ => println!("no yaku"),
                }
                if !self.verify {
                    Verify::Skip
                } else if self.score == 0 {
                    Verify::Ok
                } else {
                    Verify::Error
                }
            }
        };
        println!("verify: {:?}", verify);
        Ok(verify)
    }

    fn parse_stage_info(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        let len = exps.len();
        if len > 0 {
            let chars: Vec<char> = exps[0].chars().collect();
            if chars.len() != 2 {
                Err(format!("stage info len is not 2: {}", exps[0]))?;
            }
            self.ctx.round_wind = wind_from_char(chars[0])?;
            self.ctx.seat_wind = wind_from_char(chars[1])?;
        }
        if len > 1 {
            self.ctx.dora_indicators = tiles_from_string(exps[1])?;
        }
        if len > 2 {
            self.ctx.ura_dora_indicators = tiles_from_string(exps[2])?;
        }
        Ok(())
    }

    fn parse_hand_meld(&mut self, input: &str) -> Res {
        let mut it = input.split(',');
        let exp_hand = it.next().unwrap_or("");
        let (exp_hand, is_ron) = match exp_hand.strip_suffix('+') {
            Some(e) => (e, true),
            None => (exp_hand, false),
        };

        let mut tiles = tiles_from_string(exp_hand)?;
        self.winning_tile = tiles.pop().ok_or("empty hand")?;
        let melds = it.map(meld_from_string).collect::<Result<Vec<_>, _>>()?;
        self.hand = Hand::new(&tiles, melds);

        if is_ron {
            // the player to the left of the winner discarded
            let w = self.ctx.seat_wind;
            self.ctx.is_self_drawn = false;
            self.ctx.discarder = Some(if w == WE { WN } else { w - 1 });
        }

        Ok(())
    }

    fn parse_flags(&mut self, input: &str) -> Res {
        for f in input.split(',') {
            let (key, val) = match f.split_once(':') {
                Some((k, v)) => (k, Some(v.parse::<usize>()?)),
                None => (f, None),
            };
            match (key, val) {
                ("riichi", None) => {
                    self.ctx.riichi = Some(Riichi {
                        turn: 1,
                        is_double: false,
                    })
                }
                ("double_riichi", None) => {
                    self.ctx.riichi = Some(Riichi {
                        turn: 1,
                        is_double: true,
                    })
                }
                ("ippatsu", None) => self.ctx.is_ippatsu = true,
                ("last", None) => self.ctx.is_last_tile = true,
                ("rinshan", None) => {
                    self.ctx.is_rinshan = true;
                    self.ctx.kan_count = self.ctx.kan_count.max(1);
                }
                ("chankan", None) => self.ctx.is_chankan = true,
                ("first", None) => {
                    self.ctx.is_first_uninterrupted_turn = true;
                    self.ctx.turn = 1;
                }
                ("honba", Some(n)) => self.ctx.honba = n,
                ("kyotaku", Some(n)) => self.ctx.riichi_sticks = n,
                ("", None) => {}
                _ => Err(format!("invalid flag: {}", f))?,
            }
        }
        Ok(())
    }

    fn parse_score_verify(&mut self, input: &str) -> Res {
        let exps: Vec<&str> = input.split(',').collect();
        if exps.len() != 3 {
            Err(format!("invalid score verify info: {}", input))?;
        }
        self.fu = exps[0].parse::<usize>()?;
        self.fan = exps[1].parse::<usize>()?;
        self.score = exps[2].parse::<Point>()?;
        self.verify = true;
        Ok(())
    }
}

fn print_usage() {
    error!(
        r"invalid input
Usage
    $ riichi_hand EXPRESSION [-d] [-j]
    $ riichi_hand -f FILE [-d] [-j]
Expression
    HAND[+][,MELD...]/WINDS[,DORAS[,URAS]]/FLAGS/FU,FAN,SCORE
    e.g. m123567p345s22786/ES,z1/riichi/20,3,2700
Flags
    riichi, double_riichi, ippatsu, last, rinshan, chankan, first,
    honba:N, kyotaku:N
Options
    -d: print debug info
    -j: print the verdict as json
    -f: read expressions from file instead of a commandline expression
"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(exp: &str) -> Calculator {
        let mut calculator = Calculator::new(false, false);
        calculator.parse(exp).unwrap();
        calculator
    }

    #[test]
    fn test_parse_expression() {
        let c = calc("m123567p345s2278s6+/ES,m4,s1/riichi,ippatsu,honba:2/30,4,7700");
        assert_eq!(c.winning_tile, Tile(TS, 6));
        assert_eq!(c.ctx.seat_wind, WS);
        assert_eq!(c.ctx.discarder, Some(WE));
        assert!(!c.ctx.is_self_drawn);
        assert_eq!(c.ctx.dora_indicators, vec![Tile(TM, 4)]);
        assert_eq!(c.ctx.ura_dora_indicators, vec![Tile(TS, 1)]);
        assert!(c.ctx.is_ippatsu);
        assert_eq!(c.ctx.honba, 2);
        assert_eq!((c.fu, c.fan, c.score), (30, 4, 7700));
    }

    #[test]
    fn test_invalid_expression() {
        let mut c = Calculator::new(false, false);
        assert!(c.parse("m123x").is_err());
        let mut c = Calculator::new(false, false);
        assert!(c.parse("m123567p345s22786/ES//unknown").is_err());
        let mut c = Calculator::new(false, false);
        assert!(c.parse("m123567p345s22786/EX").is_err());
    }

    #[test]
    fn test_calculator() {
        let file = File::open("tests/win_hands.txt").unwrap();
        let lines = io::BufReader::new(file).lines();
        for exp in lines.map_while(Result::ok) {
            let e = exp.replace(' ', "");
            if e.is_empty() || e.starts_with('#') {
                println!("> {}", exp);
            } else {
                let calculator = calc(&e);
                assert_eq!(Verify::Ok, calculator.run().unwrap(), "{}", exp);
            }
        }
    }
}

// Synthetic play-by-play fixtures in the canonical play schema
//
// Three teams, three games, deliberately unbalanced pass volume so that a
// mean of team values differs from a flat per-play mean.

#![allow(dead_code)]

use polars::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct Game {
    pub season: i32,
    pub season_type: &'static str,
    pub week: i32,
    pub home: &'static str,
    pub away: &'static str,
    pub home_score: f64,
    pub away_score: f64,
}

#[derive(Debug, Clone)]
pub struct Play {
    pub game: Game,
    pub drive: f64,
    pub down: Option<f64>,
    pub posteam: &'static str,
    pub defteam: &'static str,
    pub play_type: Option<&'static str>,
    pub yards_gained: f64,
    pub yards_after_catch: Option<f64>,
    pub complete_pass: f64,
    pub incomplete_pass: f64,
    pub pass_attempt: f64,
    pub rush_attempt: f64,
    pub pass: f64,
    pub interception: f64,
    pub touchdown: f64,
    pub pass_touchdown: f64,
    pub sack: f64,
    pub fumble_lost: f64,
    pub solo_tackle: f64,
    pub assist_tackle: f64,
    pub third_down_converted: f64,
    pub goal_to_go: f64,
    pub td_team: Option<&'static str>,
    pub passer: Option<&'static str>,
    pub receiver: Option<&'static str>,
    pub pass_location: Option<&'static str>,
}

impl Play {
    fn base(game: Game, posteam: &'static str) -> Self {
        let defteam = if posteam == game.home { game.away } else { game.home };
        Self {
            game,
            drive: 1.0,
            down: Some(1.0),
            posteam,
            defteam,
            play_type: None,
            yards_gained: 0.0,
            yards_after_catch: None,
            complete_pass: 0.0,
            incomplete_pass: 0.0,
            pass_attempt: 0.0,
            rush_attempt: 0.0,
            pass: 0.0,
            interception: 0.0,
            touchdown: 0.0,
            pass_touchdown: 0.0,
            sack: 0.0,
            fumble_lost: 0.0,
            solo_tackle: 0.0,
            assist_tackle: 0.0,
            third_down_converted: 0.0,
            goal_to_go: 0.0,
            td_team: None,
            passer: None,
            receiver: None,
            pass_location: None,
        }
    }

    pub fn completion(game: Game, posteam: &'static str, passer: &'static str, yards: f64, yac: f64) -> Self {
        Self {
            play_type: Some("pass"),
            yards_gained: yards,
            yards_after_catch: Some(yac),
            complete_pass: 1.0,
            pass_attempt: 1.0,
            pass: 1.0,
            solo_tackle: 1.0,
            passer: Some(passer),
            receiver: Some("W.Receiver"),
            pass_location: Some("middle"),
            ..Self::base(game, posteam)
        }
    }

    pub fn incompletion(game: Game, posteam: &'static str, passer: &'static str) -> Self {
        Self {
            play_type: Some("pass"),
            incomplete_pass: 1.0,
            pass_attempt: 1.0,
            pass: 1.0,
            passer: Some(passer),
            pass_location: Some("left"),
            ..Self::base(game, posteam)
        }
    }

    pub fn sack(game: Game, posteam: &'static str, passer: &'static str, yards: f64) -> Self {
        Self {
            play_type: Some("pass"),
            yards_gained: yards,
            pass_attempt: 1.0,
            pass: 1.0,
            sack: 1.0,
            solo_tackle: 1.0,
            passer: Some(passer),
            ..Self::base(game, posteam)
        }
    }

    /// Designed pass that turns into a run: passer is named, no pass attempt
    pub fn scramble(game: Game, posteam: &'static str, passer: &'static str, yards: f64) -> Self {
        Self {
            play_type: Some("run"),
            yards_gained: yards,
            rush_attempt: 1.0,
            pass: 1.0,
            solo_tackle: 1.0,
            passer: Some(passer),
            ..Self::base(game, posteam)
        }
    }

    pub fn run(game: Game, posteam: &'static str, yards: f64) -> Self {
        Self {
            play_type: Some("run"),
            yards_gained: yards,
            rush_attempt: 1.0,
            solo_tackle: 1.0,
            ..Self::base(game, posteam)
        }
    }

    pub fn touchdown(mut self) -> Self {
        self.touchdown = 1.0;
        if self.pass == 1.0 {
            self.pass_touchdown = 1.0;
        }
        self.td_team = Some(self.posteam);
        self.solo_tackle = 0.0;
        self
    }

    pub fn goal_to_go(mut self, drive: f64) -> Self {
        self.goal_to_go = 1.0;
        self.drive = drive;
        self
    }
}

/// Build a frame with every canonical column
pub fn plays_frame(plays: &[Play]) -> DataFrame {
    let f = |get: fn(&Play) -> f64| plays.iter().map(get).collect::<Vec<f64>>();
    let s = |get: fn(&Play) -> Option<&'static str>| plays.iter().map(get).collect::<Vec<Option<&str>>>();

    let columns = vec![
        Column::new("season".into(), plays.iter().map(|p| p.game.season).collect::<Vec<i32>>()),
        Column::new("season_type".into(), plays.iter().map(|p| p.game.season_type).collect::<Vec<&str>>()),
        Column::new("week".into(), plays.iter().map(|p| p.game.week).collect::<Vec<i32>>()),
        Column::new("qtr".into(), vec![1.0; plays.len()]),
        Column::new("down".into(), plays.iter().map(|p| p.down).collect::<Vec<Option<f64>>>()),
        Column::new("drive".into(), f(|p| p.drive)),
        Column::new("posteam".into(), plays.iter().map(|p| p.posteam).collect::<Vec<&str>>()),
        Column::new("defteam".into(), plays.iter().map(|p| p.defteam).collect::<Vec<&str>>()),
        Column::new("home_team".into(), plays.iter().map(|p| p.game.home).collect::<Vec<&str>>()),
        Column::new("away_team".into(), plays.iter().map(|p| p.game.away).collect::<Vec<&str>>()),
        Column::new("td_team".into(), s(|p| p.td_team)),
        Column::new("home_score".into(), f(|p| p.game.home_score)),
        Column::new("away_score".into(), f(|p| p.game.away_score)),
        Column::new("play_type".into(), s(|p| p.play_type)),
        Column::new("yards_gained".into(), f(|p| p.yards_gained)),
        Column::new("yards_after_catch".into(), plays.iter().map(|p| p.yards_after_catch).collect::<Vec<Option<f64>>>()),
        Column::new("yardline_100".into(), vec![50.0; plays.len()]),
        Column::new("complete_pass".into(), f(|p| p.complete_pass)),
        Column::new("incomplete_pass".into(), f(|p| p.incomplete_pass)),
        Column::new("pass_attempt".into(), f(|p| p.pass_attempt)),
        Column::new("rush_attempt".into(), f(|p| p.rush_attempt)),
        Column::new("pass".into(), f(|p| p.pass)),
        Column::new("interception".into(), f(|p| p.interception)),
        Column::new("touchdown".into(), f(|p| p.touchdown)),
        Column::new("pass_touchdown".into(), f(|p| p.pass_touchdown)),
        Column::new("sack".into(), f(|p| p.sack)),
        Column::new("fumble_lost".into(), f(|p| p.fumble_lost)),
        Column::new("solo_tackle".into(), f(|p| p.solo_tackle)),
        Column::new("assist_tackle".into(), f(|p| p.assist_tackle)),
        Column::new("third_down_converted".into(), f(|p| p.third_down_converted)),
        Column::new("third_down_failed".into(), vec![0.0; plays.len()]),
        Column::new("goal_to_go".into(), f(|p| p.goal_to_go)),
        Column::new("passer".into(), s(|p| p.passer)),
        Column::new("receiver".into(), s(|p| p.receiver)),
        Column::new("pass_location".into(), s(|p| p.pass_location)),
        Column::new("pass_length".into(), s(|p| p.pass_location.map(|_| "short"))),
        Column::new("yrdln".into(), s(|_| Some("MID 50"))),
    ];

    DataFrame::new(columns).unwrap()
}

pub const WEEK_1: Game = Game {
    season: 2021,
    season_type: "REG",
    week: 1,
    home: "NE",
    away: "BUF",
    home_score: 24.0,
    away_score: 17.0,
};

pub const WEEK_2: Game = Game {
    season: 2021,
    season_type: "REG",
    week: 2,
    home: "BUF",
    away: "MIA",
    home_score: 20.0,
    away_score: 20.0,
};

pub const WILD_CARD: Game = Game {
    season: 2021,
    season_type: "POST",
    week: 19,
    home: "NE",
    away: "MIA",
    home_score: 31.0,
    away_score: 10.0,
};

/// Regular season completion rates: NE 3/4, BUF 2/3, MIA 1/3
pub fn league_plays() -> Vec<Play> {
    vec![
        // NE offense, week 1: one goal-to-go drive ends in a TD, the next does not
        Play::completion(WEEK_1, "NE", "M.Jones", 10.0, 4.0).goal_to_go(1.0),
        Play::completion(WEEK_1, "NE", "M.Jones", 15.0, 5.0).goal_to_go(1.0).touchdown(),
        Play::incompletion(WEEK_1, "NE", "M.Jones"),
        Play::completion(WEEK_1, "NE", "M.Jones", 6.0, 6.0).goal_to_go(2.0),
        Play::sack(WEEK_1, "NE", "M.Jones", -7.0),
        Play::run(WEEK_1, "NE", 5.0),
        // BUF offense, week 1
        Play::incompletion(WEEK_1, "BUF", "J.Allen"),
        Play::completion(WEEK_1, "BUF", "J.Allen", 20.0, 10.0),
        Play::run(WEEK_1, "BUF", 3.0),
        // Week 2
        Play::completion(WEEK_2, "BUF", "J.Allen", 8.0, 3.0),
        Play::incompletion(WEEK_2, "MIA", "T.Tagovailoa"),
        Play::incompletion(WEEK_2, "MIA", "T.Tagovailoa"),
        Play::completion(WEEK_2, "MIA", "T.Tagovailoa", 12.0, 2.0),
        // Playoffs
        Play::completion(WILD_CARD, "NE", "M.Jones", 30.0, 5.0),
        Play::run(WILD_CARD, "MIA", 2.0),
    ]
}

pub fn league_frame() -> DataFrame {
    plays_frame(&league_plays())
}

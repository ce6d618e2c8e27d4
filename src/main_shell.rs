// Copyright (C) 2020-2026 Andy Kurnia.

// Play against the virtual player from a terminal.
//   shell [word-list] [your-name]

use crossroom::return_error;
use crossroom::{command, dictionary, display, error, events, game_config, room, room_manager};
use std::sync::Arc;

const ROOM_ID: &str = "shell";

const HELP: &str = "\
new [beginner|expert] [classic|objectives] [secs]   start a game
board                                                show board, scores, rack
state                                                dump the room as json
!place h8h word | !exchange abc | !pass | !hint      play
source FILE                                          run commands from FILE
exit";

fn print_events(events: &mut events::RoomEvents) {
    events.word_placed.subscribe(|event: &events::WordPlaced| {
        println!("{} played {} for {}", event.player, event.command, event.points);
    });
    events.letters_exchanged.subscribe(|event: &events::LettersExchanged| {
        println!("{} exchanged {} tiles", event.player, event.count);
    });
    events.turn_skipped.subscribe(|event: &events::TurnSkipped| {
        println!("{} passed", event.player);
    });
    events.placement_failed.subscribe(|event: &events::PlacementFailed| {
        println!("{} lost the turn: {}", event.player, event.reason);
    });
    events.objective_completed.subscribe(|event: &events::ObjectiveCompleted| {
        println!(
            "{} completed \"{}\" for {}",
            event.player, event.description, event.bonus
        );
    });
    events.turn_changed.subscribe(|event: &events::TurnChanged| {
        println!("turn {}: {} to move", event.turn + 1, event.player);
    });
    events.game_over.subscribe(|event: &events::GameOver| {
        println!(
            "game over, {} to {}, {}",
            event.host_score,
            event.guest_score,
            event
                .winner
                .as_ref()
                .map_or("a tie".to_string(), |winner| format!("{} wins", winner))
        );
    });
}

fn parse_new_options(args: &[String]) -> error::Returns<game_config::RoomOptions> {
    let mut options = game_config::RoomOptions {
        single_player: true,
        ..game_config::RoomOptions::default()
    };
    for arg in args {
        match arg.as_str() {
            "beginner" => options.difficulty = game_config::Difficulty::Beginner,
            "expert" => options.difficulty = game_config::Difficulty::Expert,
            "classic" => options.game_type = game_config::GameType::Classic,
            "objectives" => options.game_type = game_config::GameType::Objectives,
            _ => match arg.parse::<u32>() {
                Ok(secs) => options.turn_duration_secs = secs,
                Err(_) => {
                    return_error!(format!("unknown option {:?}", arg));
                }
            },
        }
    }
    options.validate()?;
    Ok(options)
}

fn print_room(room: &room::Room, name: &str) {
    let alphabet = room.game_config().alphabet();
    display::print_board(alphabet, room.board());
    for player in room.players() {
        print!("{}: {}{}, ", player.name, player.score, if player.is_turn { "*" } else { "" });
    }
    println!("reserve: {}", room.reserve().len());
    if let Some(player) = room.player(name) {
        println!("rack: {}", alphabet.fmt_rack(player.rack.tiles()));
    }
    for objective in room.objectives().visible_to(name) {
        println!(
            "objective: {} ({}){}",
            objective.kind.description(),
            objective.kind.bonus(),
            objective
                .completed_by
                .as_ref()
                .map_or(String::new(), |player| format!(", done by {}", player))
        );
    }
}

struct Shell {
    runtime: tokio::runtime::Runtime,
    manager: room_manager::RoomManager,
    name: String,
}

impl Shell {
    fn new_game(&self, args: &[String]) -> error::Returns<()> {
        let options = parse_new_options(args)?;
        self.runtime.block_on(async {
            if self.manager.room_ids().await.iter().any(|id| id == ROOM_ID) {
                self.manager.remove_room(ROOM_ID).await?;
            }
            self.manager.create_room(ROOM_ID, &self.name, options).await?;
            self.manager.subscribe(ROOM_ID, print_events).await?;
            self.manager.accept(ROOM_ID, &self.name).await?;
            Ok::<(), error::BoxAnyError>(())
        })
    }

    fn show(&self) -> error::Returns<()> {
        let name = &self.name;
        self.runtime
            .block_on(self.manager.with_room(ROOM_ID, |room| print_room(room, name)))?;
        Ok(())
    }

    fn dump(&self) -> error::Returns<()> {
        let snapshot = self.runtime.block_on(self.manager.snapshot(ROOM_ID))?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        Ok(())
    }

    fn play(&self, line: &str) -> error::Returns<()> {
        let alphabet = game_config::make_classic_game_config().alphabet();
        let action = command::parse_action(alphabet, line)?;
        let outcome = self.runtime.block_on(
            self.manager
                .handle_command(ROOM_ID, &command::Command::new(&self.name, action)),
        )?;
        match outcome {
            room::TurnOutcome::Hints(hints) => {
                for hint in hints {
                    println!("{}", hint);
                }
            }
            room::TurnOutcome::Placed { words, .. } => {
                println!("formed {}", words.join(", "));
            }
            room::TurnOutcome::ExchangeRefused => {
                println!("exchange refused, turn skipped");
            }
            _ => {}
        }
        Ok(())
    }

    fn run(&self, strings: &[String], line: &str) -> error::Returns<()> {
        match strings[0].as_str() {
            "help" => println!("{}", HELP),
            "new" => self.new_game(&strings[1..])?,
            "board" => self.show()?,
            "state" => self.dump()?,
            verb if verb.starts_with('!') => self.play(line)?,
            _ => println!("invalid input, help for help"),
        }
        Ok(())
    }
}

fn main() -> error::Returns<()> {
    env_logger::init();
    let args = std::env::args().collect::<Vec<_>>();
    let word_list = args.get(1).map_or("words.txt", String::as_str);
    let name = args.get(2).map_or("you", String::as_str);
    if name == room::VIRTUAL_PLAYER_NAME {
        return_error!(format!("{:?} is reserved", name));
    }

    let mut word_lists = dictionary::WordListDictionary::new();
    word_lists.load_file(&game_config::RoomOptions::default().dictionary_id, word_list)?;
    let shell = Shell {
        runtime: tokio::runtime::Runtime::new()?,
        manager: room_manager::RoomManager::new(
            Arc::new(word_lists),
            game_config::ManagerConfig::from_env(),
        ),
        name: name.into(),
    };
    println!("help for help");

    let mut rl = rustyline::DefaultEditor::new()?;
    let mut cmd_stack = Vec::<(String, Option<(String, usize)>)>::new();
    loop {
        if let Some((line, source)) = cmd_stack.pop() {
            if let Some((filename, line_num)) = source {
                println!("{}:{}> {}", filename, line_num, line);
            }
            let strings = match shell_words::split(&line) {
                Ok(strings) => strings,
                Err(err) => {
                    println!("Bad quoting: {:?}", err);
                    continue;
                }
            };
            if strings.is_empty() {
                continue;
            }
            match strings[0].as_str() {
                "exit" => break,
                "source" => match strings.get(1) {
                    Some(filename) => match std::fs::read_to_string(filename) {
                        Ok(whole_file) => {
                            let v = cmd_stack.len();
                            for (line_num, line) in whole_file.lines().enumerate() {
                                cmd_stack
                                    .push((line.to_string(), Some((filename.clone(), line_num + 1))));
                            }
                            cmd_stack[v..].reverse();
                        }
                        Err(err) => println!("cannot open file: {:?}", err),
                    },
                    None => println!("need another arg"),
                },
                _ => {
                    if let Err(err) = shell.run(&strings, &line) {
                        println!("{}", err);
                    }
                }
            }
        } else {
            match rl.readline(">> ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    cmd_stack.push((line, None));
                }
                Err(rustyline::error::ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(rustyline::error::ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }
    }

    Ok(())
}

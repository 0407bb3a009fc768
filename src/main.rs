use armature_demo::core::Game;
use armature_demo::demo;

fn main() {
    let config = demo::game_config();
    Game::init_logging(&config.logging);

    let mut game = match demo::build_game_with(config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Game failed to start: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = game.run() {
        eprintln!("Game loop failed: {}", e);
        std::process::exit(1);
    }
}

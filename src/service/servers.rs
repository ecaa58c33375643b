//! Roblox server links offered inside tickets.

use serenity::all::{ButtonStyle, CreateActionRow, CreateButton, CreateEmbed};

use crate::{
    model::component::{ComponentAction, Game},
    service::EMBED_COLOR,
};

pub struct GameServers {
    pub name: &'static str,
    pub public_link: &'static str,
    pub private_link: &'static str,
    pub thumbnail: &'static str,
}

pub fn servers_for(game: Game) -> GameServers {
    match game {
        Game::Gag => GameServers {
            name: "GAG",
            public_link: "https://www.roblox.com/games/126884695634066/Grow-a-Garden?sortFilter=3",
            private_link: "https://www.roblox.com/share?code=2daaf72e32f63840b588d65a5cff53a7&type=Server",
            thumbnail: "https://cdn.discordapp.com/attachments/1373070247795495116/1396644967665111142/IMG_6743.jpg",
        },
        Game::Mm2 => GameServers {
            name: "MM2",
            public_link: "https://www.roblox.com/games/66654135/Murder-Mystery-2?sortFilter=3",
            private_link: "https://www.roblox.com/share?code=c1ac8abd3c27354e9db3979aad38b842&type=Server",
            thumbnail: "https://cdn.discordapp.com/attachments/1373070247795495116/1396644976829661194/IMG_6744.jpg",
        },
        Game::Sab => GameServers {
            name: "SAB (Steal a Brainrot)",
            public_link: "https://www.roblox.com/games/109983668079237/Steal-a-Brainrot?sortFilter=3",
            private_link: "https://www.roblox.com/share?code=d99e8e73482e8342a3aa30fb59973322&type=Server",
            thumbnail: "https://cdn.discordapp.com/attachments/1373070247795495116/1396644973134348288/IMG_6745.jpg",
        },
    }
}

/// Panel posted by `servers <game>`.
pub fn options_panel(game: Game) -> (CreateEmbed, Vec<CreateActionRow>) {
    let servers = servers_for(game);

    let embed = CreateEmbed::new()
        .title(format!("Server Options for {}", servers.name))
        .description(
            "**Please Choose Which Server You Would Be The Most Comfortable For The Trade In. \
             Confirm The Middleman Which Server To Join**",
        )
        .color(EMBED_COLOR)
        .image(servers.thumbnail);

    let buttons = vec![CreateActionRow::Buttons(vec![
        CreateButton::new(ComponentAction::ChooseServer { game, private: false }.custom_id())
            .label("Join Public Server")
            .style(ButtonStyle::Primary),
        CreateButton::new(ComponentAction::ChooseServer { game, private: true }.custom_id())
            .label("Join Private Server")
            .style(ButtonStyle::Secondary),
    ])];

    (embed, buttons)
}

/// Embed replacing the panel once someone picks a server.
pub fn chosen_embed(game: Game, private: bool, chooser_id: u64) -> CreateEmbed {
    let servers = servers_for(game);
    let (kind, link) = if private {
        ("Private", servers.private_link)
    } else {
        ("Public", servers.public_link)
    };

    CreateEmbed::new()
        .title("Server Chosen")
        .description(format!(
            "**<@{}> has chosen to trade in the {} Server.**",
            chooser_id, kind
        ))
        .color(EMBED_COLOR)
        .field("🔗 Click to Join:", format!("[{} Server Link]({})", kind, link), false)
        .image(servers.thumbnail)
}

use serenity::all::{
    ActivityData, Client, Command, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EventHandler, GatewayIntents, Guild, Interaction, Ready,
    ResolvedValue, UnavailableGuild,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::commands::{self, JamCommand, Reply};
use crate::generator::JamGenerator;

pub struct JamHandler {
    generator: Arc<JamGenerator>,
}

impl JamHandler {
    pub fn new(generator: Arc<JamGenerator>) -> Self {
        Self { generator }
    }

    async fn send(&self, ctx: &Context, interaction: &CommandInteraction, reply: Reply, deferred: bool) {
        let result = if deferred {
            let followup = CreateInteractionResponseFollowup::new()
                .content(reply.content)
                .ephemeral(reply.ephemeral);
            interaction.create_followup(&ctx.http, followup).await.map(|_| ())
        } else {
            let message = CreateInteractionResponseMessage::new()
                .content(reply.content)
                .ephemeral(reply.ephemeral);
            interaction
                .create_response(&ctx.http, CreateInteractionResponse::Message(message))
                .await
        };

        if let Err(e) = result {
            error!("Failed to answer /{}: {}", interaction.data.name, e);
        }
    }
}

#[async_trait]
impl EventHandler for JamHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Bot is ready! Logged in as {}", ready.user.name);
        info!("Connected to {} server(s)", ready.guilds.len());

        ctx.set_activity(Some(ActivityData::playing("Game Jams | /help")));

        match Command::set_global_commands(&ctx.http, slash_commands()).await {
            Ok(synced) => info!("Synced {} command(s)", synced.len()),
            Err(e) => error!("Failed to sync commands: {}", e),
        }
    }

    async fn guild_create(&self, _ctx: Context, guild: Guild, is_new: Option<bool>) {
        if is_new == Some(true) {
            info!("Joined new server: {} (ID: {})", guild.name, guild.id);
        }
    }

    async fn guild_delete(&self, _ctx: Context, incomplete: UnavailableGuild, full: Option<Guild>) {
        let name = full.map(|g| g.name).unwrap_or_default();
        info!("Left server: {} (ID: {})", name, incomplete.id);
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(interaction) = interaction else {
            return;
        };

        let Some(command) = parse_command(&interaction) else {
            warn!("Ignoring unknown command /{}", interaction.data.name);
            return;
        };

        let deferred = command.is_slow();
        if deferred {
            if let Err(e) = interaction.defer(&ctx.http).await {
                error!("Failed to defer /{}: {}", interaction.data.name, e);
                return;
            }
        }

        let reply = commands::execute(&self.generator, command).await;
        self.send(&ctx, &interaction, reply, deferred).await;
    }
}

pub fn slash_commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("generate-concept")
            .description("Generate a random game concept with constraints")
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "genre",
                "Specify a genre (platformer, rpg, puzzle, etc.)",
            ))
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "difficulty",
                "Difficulty level: Easy, Medium, Hard, or Insane",
            )),
        CreateCommand::new("generate-constraint")
            .description("Add one more constraint to your existing concept"),
        CreateCommand::new("vibe-check")
            .description("Get AI commentary on your current progress/mood")
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "message",
                "Your current status or situation (optional)",
            )),
        CreateCommand::new("help").description("Show available commands and usage information"),
    ]
}

fn parse_command(interaction: &CommandInteraction) -> Option<JamCommand> {
    let options = interaction.data.options();
    let string_option = |name: &str| {
        options
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| match &o.value {
                ResolvedValue::String(s) => Some(s.to_string()),
                _ => None,
            })
    };

    match interaction.data.name.as_str() {
        "generate-concept" => Some(JamCommand::GenerateConcept {
            genre: string_option("genre"),
            difficulty: string_option("difficulty").unwrap_or_else(|| "medium".to_string()),
        }),
        "generate-constraint" => Some(JamCommand::GenerateConstraint),
        "vibe-check" => Some(JamCommand::VibeCheck {
            message: string_option("message").unwrap_or_default(),
        }),
        "help" => Some(JamCommand::Help),
        _ => None,
    }
}

/// Connects to the gateway and serves slash commands until the connection ends.
pub async fn run(token: &str, generator: Arc<JamGenerator>) -> Result<(), serenity::Error> {
    let mut client = Client::builder(token, GatewayIntents::GUILDS)
        .event_handler(JamHandler::new(generator))
        .await?;

    client.start().await
}

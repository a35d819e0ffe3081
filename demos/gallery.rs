//! A small gallery to walk around in, showing the steps needed to get started with the plugin.

use bevy::prelude::*;
use bevy_walk_cam::prelude::*;

const ROOM_HALF_WIDTH: f32 = 5.0;
const ROOM_HALF_LENGTH: f32 = 10.0;
const WALL_HEIGHT: f32 = 4.0;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            MeshPickingPlugin,
            DefaultWalkCamPlugins, // Step 1: Add camera controller plugin
        ))
        .add_systems(Startup, (setup_camera, setup_scene))
        .add_systems(Update, (send_commands, log_notifications))
        .run();
}

fn setup_camera(mut commands: Commands) {
    let touch_capable = cfg!(any(target_os = "android", target_os = "ios"));
    let position = Vec3::new(0.0, 1.6, 8.0);
    let target = Vec3::new(0.0, 1.6, 0.0);
    commands.spawn((
        Camera3d::default(),
        // Step 2: add camera controller component to any cameras, picking the input profile once
        WalkCam::new(InputProfile::detect(touch_capable)).looking_at(position, target),
        Transform::from_translation(position).looking_at(target, Vec3::Y),
    ));
}

fn paintings() -> Vec<PointOfInterest> {
    let west = -ROOM_HALF_WIDTH;
    let east = ROOM_HALF_WIDTH;
    let north = -ROOM_HALF_LENGTH;
    vec![
        PointOfInterest::new(Vec3::new(west, 2.0, -6.0), Vec3::X).with_label("Harbor at dawn"),
        PointOfInterest::new(Vec3::new(west, 2.0, -1.0), Vec3::X).with_label("Orchard"),
        PointOfInterest::new(Vec3::new(west, 2.0, 4.0), Vec3::X).with_label("Self portrait"),
        PointOfInterest::new(Vec3::new(east, 2.0, -5.0), Vec3::NEG_X).with_label("Salt flats"),
        PointOfInterest::new(Vec3::new(east, 2.0, 3.0), Vec3::NEG_X).with_label("Night market"),
        PointOfInterest::new(Vec3::new(0.0, 2.0, north), Vec3::Z)
            .with_extent(Vec2::new(2.5, 1.5))
            .with_label("Triptych"),
    ]
}

// Step 3: hand the camera its points of interest, and drive it with commands.
fn send_commands(
    keys: Res<ButtonInput<KeyCode>>,
    mut ready: Local<bool>,
    mut celebrating: Local<bool>,
    mut commands: EventWriter<WalkCamCommand>,
) {
    if !*ready {
        commands.write(WalkCamCommand::PointsOfInterestReady(paintings()));
        *ready = true;
    }
    if keys.just_pressed(KeyCode::KeyM) {
        commands.write(WalkCamCommand::ModeSelected);
    }
    if keys.just_pressed(KeyCode::KeyT) {
        commands.write(WalkCamCommand::StartTour);
    }
    if keys.just_pressed(KeyCode::KeyX) {
        commands.write(WalkCamCommand::StopTour);
    }
    if keys.just_pressed(KeyCode::KeyC) {
        *celebrating = !*celebrating;
        commands.write(if *celebrating {
            WalkCamCommand::CelebrationStart
        } else {
            WalkCamCommand::CelebrationStop
        });
    }
}

fn log_notifications(mut notifications: EventReader<WalkCamNotification>) {
    for notification in notifications.read() {
        info!("{:?}: {:?}", notification.camera, notification.kind);
    }
}

//
// --- The below code is not important for the example ---
//

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let wall = materials.add(Color::srgb(0.85, 0.82, 0.76));
    let floor = materials.add(Color::srgb(0.35, 0.28, 0.22));
    let canvas = materials.add(Color::srgb(0.2, 0.35, 0.6));

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(
            2.0 * ROOM_HALF_WIDTH,
            0.1,
            2.0 * ROOM_HALF_LENGTH,
        ))),
        MeshMaterial3d(floor.clone()),
        Transform::from_xyz(0.0, -0.05, 0.0),
    ));

    let side = meshes.add(Cuboid::new(0.2, WALL_HEIGHT, 2.0 * ROOM_HALF_LENGTH));
    let end = meshes.add(Cuboid::new(2.0 * ROOM_HALF_WIDTH, WALL_HEIGHT, 0.2));
    let walls = [
        (side.clone(), Vec3::new(-ROOM_HALF_WIDTH - 0.1, 0.0, 0.0)),
        (side, Vec3::new(ROOM_HALF_WIDTH + 0.1, 0.0, 0.0)),
        (end.clone(), Vec3::new(0.0, 0.0, -ROOM_HALF_LENGTH - 0.1)),
        (end, Vec3::new(0.0, 0.0, ROOM_HALF_LENGTH + 0.1)),
    ];
    for (mesh, position) in walls {
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(wall.clone()),
            Transform::from_translation(position + Vec3::Y * WALL_HEIGHT / 2.0),
        ));
    }

    // A bench in the middle of the room to slide along.
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.0, 0.5, 4.0))),
        MeshMaterial3d(floor),
        Transform::from_xyz(2.5, 0.25, 6.0),
    ));

    for painting in paintings() {
        let depth = 0.04;
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(painting.extent.x, painting.extent.y, depth))),
            MeshMaterial3d(canvas.clone()),
            Transform::from_translation(painting.center + painting.normal * depth / 2.0)
                .looking_to(-painting.normal, Vec3::Y),
        ));
    }

    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 30.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, WALL_HEIGHT - 0.5, 0.0),
    ));

    let text = "\
        M - Enable walking\n\
        Click - Lock pointer (Escape to release)\n\
        WASD / Arrows - Walk\n\
        T - Start tour, X - Stop tour\n\
        C - Toggle celebration\n";
    commands.spawn((
        Text::new(text),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        Node {
            margin: UiRect::all(Val::Px(20.0)),
            ..Default::default()
        },
    ));
}
